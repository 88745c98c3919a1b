//! # Questions
//!
//! Canonical domains and the tables that map free-text CSV categories onto them.
//!
//! ## Tables
//!
//! - Source category (**string**) to [`Domain`]: many-to-one, exact match
//! - [`Domain`] to display name and icon: one-to-one, declaration order matters for reverse lookups
//!
//! ## Repair Rules
//!
//! Some upstream rows were split on an embedded comma, leaving a category such as
//! `and CROSS JOIN.`. Those rows are reclassified from keywords in their question and
//! answer, or dropped when no rule applies.
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace"));

pub const DEFAULT_ICON: &str = "📚";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub domain: String,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    WebDev,
    Database,
    DataScience,
    Systems,
    DevOps,
    Programming,
    Security,
}

impl Domain {
    pub const ALL: [Domain; 7] = [
        Domain::WebDev,
        Domain::Database,
        Domain::DataScience,
        Domain::Systems,
        Domain::DevOps,
        Domain::Programming,
        Domain::Security,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Domain::WebDev => "webdev",
            Domain::Database => "database",
            Domain::DataScience => "datascience",
            Domain::Systems => "systems",
            Domain::DevOps => "devops",
            Domain::Programming => "programming",
            Domain::Security => "security",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Domain::WebDev => "Web Development",
            Domain::Database => "Database",
            Domain::DataScience => "Data Science & AI",
            Domain::Systems => "Systems & Infrastructure",
            Domain::DevOps => "DevOps & Tools",
            Domain::Programming => "Programming Fundamentals",
            Domain::Security => "Security",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Domain::WebDev => "🌐",
            Domain::Database => "🗄️",
            Domain::DataScience => "🤖",
            Domain::Systems => "🏗️",
            Domain::DevOps => "🔧",
            Domain::Programming => "📝",
            Domain::Security => "🔒",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Domain> {
        Domain::ALL.into_iter().find(|domain| domain.slug() == slug)
    }

    /// First domain in declaration order whose display name matches.
    pub fn from_display_name(name: &str) -> Option<Domain> {
        Domain::ALL
            .into_iter()
            .find(|domain| domain.display_name() == name)
    }
}

/// Source category strings as they appear in the CSV.
const SOURCE_CATEGORIES: &[(&str, Domain)] = &[
    ("Front-end", Domain::WebDev),
    ("Back-end", Domain::WebDev),
    ("Full-stack", Domain::WebDev),
    ("Web Development", Domain::WebDev),
    ("Database and SQL", Domain::Database),
    ("Database Systems", Domain::Database),
    ("Data Structures", Domain::DataScience),
    ("Algorithms", Domain::DataScience),
    ("Machine Learning", Domain::DataScience),
    ("Artificial Intelligence", Domain::DataScience),
    ("Data Engineering", Domain::DataScience),
    ("System Design", Domain::Systems),
    ("Distributed Systems", Domain::Systems),
    ("Networking", Domain::Systems),
    ("Low-level Systems", Domain::Systems),
    ("DevOps", Domain::DevOps),
    ("Version Control", Domain::DevOps),
    ("Software Testing", Domain::DevOps),
    ("General Programming", Domain::Programming),
    // typo present in the upstream CSV
    ("General Program", Domain::Programming),
    ("Languages and Frameworks", Domain::Programming),
    ("Security", Domain::Security),
];

pub fn source_domain(category: &str) -> Option<Domain> {
    SOURCE_CATEGORIES
        .iter()
        .find(|(source, _)| *source == category)
        .map(|(_, domain)| *domain)
}

/// Canonical slug for a category, or a derived one when the table has no entry.
pub fn resolve_slug(category: &str) -> String {
    match source_domain(category) {
        Some(domain) => domain.slug().to_string(),
        None => slugify(category),
    }
}

pub fn slugify(input: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&input.to_lowercase(), "-")
        .into_owned()
}

pub fn is_malformed_category(category: &str) -> bool {
    category.starts_with("and ") || category.starts_with("-and ")
}

/// Lowercased question and answer text of a row under repair.
pub struct RowText<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

impl RowText<'_> {
    fn question_has(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.question.contains(needle))
    }

    fn answer_has(&self, needles: &[&str]) -> bool {
        needles.iter().any(|needle| self.answer.contains(needle))
    }
}

pub struct RepairRule {
    pub category: &'static str,
    pub matches: fn(&RowText) -> bool,
}

/// Evaluated in order, first match wins.
pub const REPAIR_RULES: &[RepairRule] = &[
    RepairRule {
        category: "Database and SQL",
        matches: mentions_join,
    },
    RepairRule {
        category: "Web Development",
        matches: mentions_browser_storage,
    },
];

fn mentions_join(row: &RowText) -> bool {
    row.question_has(&["cross join", "inner join", "outer join"]) || row.answer_has(&["join"])
}

fn mentions_browser_storage(row: &RowText) -> bool {
    row.question_has(&["cookie", "storage"]) || row.answer_has(&["cookie", "storage"])
}

/// Category inferred for a malformed row, `None` when the row should be dropped.
pub fn repair_category(question: &str, answer: &str) -> Option<&'static str> {
    let question = question.to_lowercase();
    let answer = answer.to_lowercase();
    let row = RowText {
        question: &question,
        answer: &answer,
    };

    REPAIR_RULES
        .iter()
        .find(|rule| (rule.matches)(&row))
        .map(|rule| rule.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_categories() {
        assert_eq!(resolve_slug("Front-end"), "webdev");
        assert_eq!(resolve_slug("Database Systems"), "database");
        assert_eq!(resolve_slug("General Program"), "programming");
        assert_eq!(resolve_slug("Security"), "security");
    }

    #[test]
    fn test_resolve_unknown_category_falls_back() {
        assert_eq!(resolve_slug("Cloud  Computing"), "cloud-computing");
        assert_eq!(resolve_slug("Mobile\tDev"), "mobile-dev");
        assert_eq!(resolve_slug(""), "");
    }

    #[test]
    fn test_every_source_category_is_canonical() {
        for (source, domain) in SOURCE_CATEGORIES {
            assert_eq!(Domain::from_slug(&resolve_slug(source)), Some(*domain));
        }
    }

    #[test]
    fn test_display_name_round_trip() {
        for domain in Domain::ALL {
            assert_eq!(Domain::from_display_name(domain.display_name()), Some(domain));
        }
        assert_eq!(Domain::from_display_name("Cooking"), None);
    }

    #[test]
    fn test_malformed_prefixes() {
        assert!(is_malformed_category("and CROSS JOIN."));
        assert!(is_malformed_category("-and cookies."));
        assert!(!is_malformed_category("Android"));
        assert!(!is_malformed_category("Database and SQL"));
    }

    #[test]
    fn test_repair_join_keywords() {
        assert_eq!(
            repair_category("What is a CROSS JOIN?", "A cartesian product."),
            Some("Database and SQL")
        );
        assert_eq!(
            repair_category("How do you combine tables?", "Use a JOIN."),
            Some("Database and SQL")
        );
    }

    #[test]
    fn test_repair_web_keywords() {
        assert_eq!(
            repair_category("Where do Cookies live?", "In the browser."),
            Some("Web Development")
        );
        assert_eq!(
            repair_category("Where is state kept?", "In session storage."),
            Some("Web Development")
        );
    }

    #[test]
    fn test_repair_join_takes_priority() {
        assert_eq!(
            repair_category("Cookie or inner join?", "Neither."),
            Some("Database and SQL")
        );
    }

    #[test]
    fn test_repair_unmatched_is_dropped() {
        assert_eq!(repair_category("What is a monad?", "A monoid."), None);
    }
}
