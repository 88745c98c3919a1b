//! # Navigation Commands
//!
//! The assistant can ask for a view change by embedding `[NAVIGATE:<slug>]` anywhere in
//! its reply.
//!
//! - The first directive decides the destination
//! - Every directive is scrubbed from the text shown to the user
//! - A scrubbed directive leaves one space only when it sat between spaces on both sides,
//!   then the text is trimmed
//!
//! The slug is not checked against the known categories. An unknown slug routes to an
//! empty practice view.
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static NAVIGATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[NAVIGATE:([^\]]+)\]").expect("navigate"));
static NAVIGATE_PADDED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([^\S\n]*)\[NAVIGATE:[^\]]+\]([^\S\n]*)").expect("navigate padded"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationDirective {
    pub target_slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Navigate(NavigationDirective),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    pub display_text: String,
    pub command: Option<Command>,
}

impl Interpretation {
    pub fn navigation(&self) -> Option<&NavigationDirective> {
        match &self.command {
            Some(Command::Navigate(directive)) => Some(directive),
            None => None,
        }
    }
}

pub fn interpret(text: &str) -> Interpretation {
    let Some(captures) = NAVIGATE_RE.captures(text) else {
        return Interpretation {
            display_text: text.to_string(),
            command: None,
        };
    };

    let directive = NavigationDirective {
        target_slug: captures[1].to_string(),
    };

    let display_text = NAVIGATE_PADDED_RE
        .replace_all(text, |padding: &Captures| {
            if padding[1].is_empty() || padding[2].is_empty() {
                ""
            } else {
                " "
            }
        })
        .trim()
        .to_string();

    Interpretation {
        display_text,
        command: Some(Command::Navigate(directive)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(interpretation: &Interpretation) -> Option<&str> {
        interpretation
            .navigation()
            .map(|directive| directive.target_slug.as_str())
    }

    #[test]
    fn test_directive_in_middle() {
        let result = interpret("Sure! [NAVIGATE:webdev] enjoy");
        assert_eq!(result.display_text, "Sure! enjoy");
        assert_eq!(target(&result), Some("webdev"));
    }

    #[test]
    fn test_first_directive_wins_all_removed() {
        let result = interpret("[NAVIGATE:a] hi [NAVIGATE:b]");
        assert_eq!(result.display_text, "hi");
        assert_eq!(target(&result), Some("a"));
    }

    #[test]
    fn test_no_directive_keeps_text_untouched() {
        let result = interpret("  Just an answer.  ");
        assert_eq!(result.display_text, "  Just an answer.  ");
        assert_eq!(result.command, None);
    }

    #[test]
    fn test_directive_at_end() {
        let result = interpret("Taking you to Security now.\n\n[NAVIGATE:security]");
        assert_eq!(result.display_text, "Taking you to Security now.");
        assert_eq!(target(&result), Some("security"));
    }

    #[test]
    fn test_directive_glued_to_text() {
        let result = interpret("Here:[NAVIGATE:devops]go");
        assert_eq!(result.display_text, "Here:go");
        assert_eq!(target(&result), Some("devops"));
    }

    #[test]
    fn test_directive_on_its_own_line() {
        let result = interpret("Line one\n[NAVIGATE:x]\nLine two");
        assert_eq!(result.display_text, "Line one\n\nLine two");
        assert_eq!(target(&result), Some("x"));
    }

    #[test]
    fn test_one_sided_padding_is_dropped() {
        let result = interpret("Go [NAVIGATE:devops]now");
        assert_eq!(result.display_text, "Gonow");
    }

    #[test]
    fn test_empty_slug_is_not_a_directive() {
        let result = interpret("Nothing [NAVIGATE:] here");
        assert_eq!(result.display_text, "Nothing [NAVIGATE:] here");
        assert_eq!(result.command, None);
    }

    #[test]
    fn test_unknown_slug_is_passed_through() {
        let result = interpret("[NAVIGATE:not-a-category]");
        assert_eq!(result.display_text, "");
        assert_eq!(target(&result), Some("not-a-category"));
    }
}
