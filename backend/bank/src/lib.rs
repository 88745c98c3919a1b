//! # Question Bank
//!
//! Everything derived from the static `questions.csv` file.
//!
//! ## Pipeline
//!
//! - CSV text is normalized into [`QuestionRecord`]s, one per usable row
//! - Records are grouped into [`CategoryDescriptor`]s for the landing page and the chat prompt
//! - A [`PracticeSession`] shuffles one category and walks it circularly
//!
//! ## Loading
//!
//! Both loaders are fail-soft. An unreadable file, a failed request or a bad status
//! all come back as an empty list and a warning in the logs, never as an error.
//! Downstream this shows up as "no categories" or "no questions for this domain".
use std::{fs, path::Path};

use anyhow::{Error, bail};
use reqwest::get;
use tracing::{info, warn};

pub mod categories;
pub mod navigation;
pub mod normalize;
pub mod payloads;
pub mod questions;
pub mod session;

pub use categories::{CategoryDescriptor, aggregate};
pub use navigation::{Command, Interpretation, NavigationDirective, interpret};
pub use normalize::normalize;
pub use questions::{Domain, QuestionRecord};
pub use session::PracticeSession;

pub const QUESTIONS_PATH: &str = "/data/questions.csv";

pub fn get_bank(path: impl AsRef<Path>) -> Vec<QuestionRecord> {
    let path = path.as_ref();

    match fs::read_to_string(path) {
        Ok(text) => normalize(&text),
        Err(e) => {
            warn!("Failed to read question bank {}: {e}", path.display());
            Vec::new()
        }
    }
}

pub async fn get_bank_remote(url: &str) -> Vec<QuestionRecord> {
    match fetch_text(url).await {
        Ok(text) => {
            let records = normalize(&text);
            info!("Loaded {} questions from {url}", records.len());
            records
        }
        Err(e) => {
            warn!("Error loading CSV from {url}: {e}");
            Vec::new()
        }
    }
}

async fn fetch_text(url: &str) -> Result<String, Error> {
    let response = get(url).await?;

    let status = response.status();
    if !status.is_success() {
        bail!("unexpected status {status}");
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_get_bank_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Category,Question,Answer").unwrap();
        writeln!(file, "Security,What is XSS?,Script injection.").unwrap();

        let records = get_bank(file.path());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].domain, "security");
    }

    #[test]
    fn test_get_bank_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(get_bank(dir.path().join("missing.csv")).is_empty());
    }

    #[test]
    fn test_shipped_bank() {
        let records = get_bank(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/questions.csv"));
        assert_eq!(records.len(), 22);

        let categories = aggregate(&records);
        assert_eq!(categories.len(), 7);
        assert_eq!(categories.iter().map(|c| c.count).sum::<usize>(), 22);

        let webdev = categories.iter().find(|c| c.id == "webdev").unwrap();
        assert_eq!(webdev.count, 5);
        let database = categories.iter().find(|c| c.id == "database").unwrap();
        assert_eq!(database.count, 3);
    }

    #[tokio::test]
    async fn test_get_bank_remote_unreachable_is_empty() {
        assert!(get_bank_remote("http://127.0.0.1:9/data/questions.csv").await.is_empty());
    }
}
