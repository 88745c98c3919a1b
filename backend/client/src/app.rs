//! Terminal views: category landing, practice deck, chatbot and the local CSV check.
use std::path::Path;

use anyhow::Result;
use bank::{CategoryDescriptor, PracticeSession, aggregate, get_bank};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin, stdin},
    time::sleep,
};
use tracing::warn;

use crate::{
    api::{ApiClient, ChatBackend},
    chat::{ChatSession, NAVIGATION_DELAY, Reply},
    error::ClientError,
    explain::{Explanation, Language},
    loader::CategoryLoader,
};

const PRACTICE_HELP: &str =
    "[enter] reveal  [n]ext  [p]revious  [e]xplain  [f] switch language  [q]uit";
const CHAT_HELP: &str = "Type a message, or /quit to leave.";

pub fn stdin_lines() -> Lines<BufReader<Stdin>> {
    BufReader::new(stdin()).lines()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeCommand {
    Reveal,
    Next,
    Previous,
    Explain,
    SwitchLanguage,
    Quit,
}

impl PracticeCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "" | "r" | "reveal" => Some(Self::Reveal),
            "n" | "next" => Some(Self::Next),
            "p" | "prev" | "previous" => Some(Self::Previous),
            "e" | "explain" => Some(Self::Explain),
            "f" | "lang" | "language" => Some(Self::SwitchLanguage),
            "q" | "quit" | "back" => Some(Self::Quit),
            _ => None,
        }
    }
}

pub fn render_category(category: &CategoryDescriptor) -> String {
    format!(
        "{} {:<28} {:>14}   ({})",
        category.icon,
        category.name,
        category.count_label(),
        category.id
    )
}

fn print_categories(categories: &[CategoryDescriptor]) {
    if categories.is_empty() {
        println!("No categories available yet.");
        return;
    }

    for category in categories {
        println!("{}", render_category(category));
    }
}

pub struct App {
    api: ApiClient,
    loader: CategoryLoader,
}

impl App {
    pub fn new(api: ApiClient, loader: CategoryLoader) -> Self {
        Self { api, loader }
    }

    pub async fn categories(&self) -> Result<()> {
        match self.loader.load(|| self.api.questions()).await {
            Ok(categories) => print_categories(&categories),
            Err(ClientError::Timeout) => println!("{}", ClientError::Timeout),
            Err(e) => return Err(e.into()),
        }

        Ok(())
    }

    pub async fn practice<R>(&self, slug: &str, input: &mut Lines<R>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let questions = self.api.questions().await;

        match PracticeSession::start(&questions, slug) {
            Some(session) => run_practice(session, &self.api, input).await,
            None => {
                println!("No questions found for this domain");
                Ok(())
            }
        }
    }

    pub async fn chat<R>(&self, input: &mut Lines<R>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let categories = self
            .loader
            .load(|| self.api.questions())
            .await
            .unwrap_or_else(|e| {
                warn!("Chatting without categories: {e}");
                Vec::new()
            });

        let mut session = ChatSession::new(&self.api, &categories);

        println!("{}", session.messages()[0].content);
        println!("{CHAT_HELP}");

        while let Some(line) = input.next_line().await? {
            if line.trim() == "/quit" {
                break;
            }

            match session.send(&line).await {
                Reply::Ignored => {}
                Reply::Message(text) | Reply::Failed(text) => println!("\n{text}\n"),
                Reply::Navigate { text, slug } => {
                    println!("\n{text}\n");
                    sleep(NAVIGATION_DELAY).await;
                    self.practice(&slug, input).await?;
                    println!("{CHAT_HELP}");
                }
            }
        }

        Ok(())
    }
}

/// Operator data check, aggregates a local CSV exactly like the landing page would.
pub fn check(path: &Path) {
    let questions = get_bank(path);
    println!("{} questions", questions.len());
    print_categories(&aggregate(&questions));
}

pub async fn run_practice<R>(
    mut session: PracticeSession,
    backend: &impl ChatBackend,
    input: &mut Lines<R>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut language = Language::default();
    let mut explanation: Option<Explanation> = None;

    show_card(&session);

    while let Some(line) = input.next_line().await? {
        let Some(command) = PracticeCommand::parse(&line) else {
            println!("{PRACTICE_HELP}");
            continue;
        };

        match command {
            PracticeCommand::Reveal => println!("\n{}\n", session.current().answer),
            PracticeCommand::Next => {
                session.advance();
                explanation = None;
                show_card(&session);
            }
            PracticeCommand::Previous => {
                session.retreat();
                explanation = None;
                show_card(&session);
            }
            PracticeCommand::Explain | PracticeCommand::SwitchLanguage => {
                if command == PracticeCommand::SwitchLanguage {
                    language = language.toggle();
                }

                let card = session.current();
                let current = explanation
                    .get_or_insert_with(|| Explanation::new(&card.question, &card.answer));

                let text = match current.get(backend, language).await {
                    Ok(text) => text,
                    Err(failure) => failure,
                };
                println!("\n{text}\n");
            }
            PracticeCommand::Quit => break,
        }
    }

    Ok(())
}

fn show_card(session: &PracticeSession) {
    let card = session.current();

    println!("\n{}  {}", session.domain_name(), session.position());
    if let Some(difficulty) = &card.difficulty {
        println!("Difficulty: {difficulty}");
    }
    println!("\n{}\n", card.question);
    println!("{PRACTICE_HELP}");
}

#[cfg(test)]
mod tests {
    use bank::QuestionRecord;

    use super::*;
    use crate::chat::tests::ScriptedBackend;

    fn session() -> PracticeSession {
        let questions: Vec<QuestionRecord> = (0..3)
            .map(|i| QuestionRecord {
                domain: "webdev".to_string(),
                question: format!("Q{i}"),
                answer: format!("A{i}"),
                difficulty: None,
            })
            .collect();

        PracticeSession::start(&questions, "webdev").unwrap()
    }

    #[test]
    fn test_parse_practice_commands() {
        assert_eq!(PracticeCommand::parse(""), Some(PracticeCommand::Reveal));
        assert_eq!(PracticeCommand::parse(" N "), Some(PracticeCommand::Next));
        assert_eq!(PracticeCommand::parse("p"), Some(PracticeCommand::Previous));
        assert_eq!(PracticeCommand::parse("explain"), Some(PracticeCommand::Explain));
        assert_eq!(PracticeCommand::parse("f"), Some(PracticeCommand::SwitchLanguage));
        assert_eq!(PracticeCommand::parse("back"), Some(PracticeCommand::Quit));
        assert_eq!(PracticeCommand::parse("x"), None);
    }

    #[test]
    fn test_render_category() {
        let line = render_category(&CategoryDescriptor {
            id: "webdev".to_string(),
            name: "Web Development".to_string(),
            icon: "🌐".to_string(),
            count: 1,
        });

        assert!(line.starts_with("🌐 Web Development"));
        assert!(line.contains("1 question "));
        assert!(line.ends_with("(webdev)"));
    }

    #[tokio::test]
    async fn test_practice_explains_once_per_language() {
        let backend = ScriptedBackend::new(vec![
            Ok("english".to_string()),
            Ok("français".to_string()),
        ]);
        let mut input = &b"\ne\nf\nf\nq\nn\n"[..];
        let mut lines = (&mut input).lines();

        run_practice(session(), &backend, &mut lines).await.unwrap();

        assert_eq!(backend.sent.lock().unwrap().len(), 2);
        // quit stops reading, the trailing command is left unread
        assert_eq!(input, &b"n\n"[..]);
    }

    #[tokio::test]
    async fn test_practice_ends_on_eof() {
        let backend = ScriptedBackend::default();
        let mut lines = (&b"n\np\nzzz\n"[..]).lines();

        run_practice(session(), &backend, &mut lines).await.unwrap();
        assert!(backend.sent.lock().unwrap().is_empty());
    }
}
