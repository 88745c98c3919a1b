//! # CSV Normalization
//!
//! Raw CSV text in, [`QuestionRecord`]s out.
//!
//! - Header row required, blank lines skipped, ragged rows tolerated
//! - Columns are read from the capitalized header first, then the lowercase one
//! - Malformed categories go through the repair rules in [`crate::questions`]
//! - Rows without a question, an answer or a slug are dropped silently
//!
//! Output keeps CSV row order and is not deduplicated.
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::questions::{QuestionRecord, is_malformed_category, repair_category, resolve_slug};

const CATEGORY: [&str; 2] = ["Category", "category"];
const QUESTION: [&str; 2] = ["Question", "question"];
const ANSWER: [&str; 2] = ["Answer", "answer"];
const DIFFICULTY: [&str; 2] = ["Difficulty", "difficulty"];

struct Columns {
    category: Vec<usize>,
    question: Vec<usize>,
    answer: Vec<usize>,
    difficulty: Vec<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let positions = |names: [&str; 2]| -> Vec<usize> {
            names
                .iter()
                .filter_map(|name| headers.iter().position(|header| header == *name))
                .collect()
        };

        Self {
            category: positions(CATEGORY),
            question: positions(QUESTION),
            answer: positions(ANSWER),
            difficulty: positions(DIFFICULTY),
        }
    }
}

/// First non-empty value among the candidate columns.
fn field<'r>(record: &'r StringRecord, columns: &[usize]) -> &'r str {
    columns
        .iter()
        .filter_map(|&index| record.get(index))
        .find(|value| !value.is_empty())
        .unwrap_or("")
}

pub fn normalize(csv_text: &str) -> Vec<QuestionRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(csv_text.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => Columns::from_headers(headers),
        Err(e) => {
            debug!("Unreadable CSV header: {e}");
            return Vec::new();
        }
    };

    let mut questions = Vec::new();
    let mut dropped = 0;

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                debug!("Skipping unreadable row: {e}");
                dropped += 1;
                continue;
            }
        };

        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }

        match normalize_row(&record, &columns) {
            Some(question) => questions.push(question),
            None => dropped += 1,
        }
    }

    debug!("Normalized {} questions, dropped {dropped} rows", questions.len());

    questions
}

fn normalize_row(record: &StringRecord, columns: &Columns) -> Option<QuestionRecord> {
    let question = field(record, &columns.question).trim();
    let answer = field(record, &columns.answer).trim();

    let mut category = field(record, &columns.category).trim();
    if is_malformed_category(category) {
        category = repair_category(question, answer)?;
    }

    let slug = resolve_slug(category);

    if question.is_empty() || answer.is_empty() || slug.is_empty() {
        return None;
    }

    let difficulty = field(record, &columns.difficulty).trim();

    Some(QuestionRecord {
        domain: slug,
        question: question.to_string(),
        answer: answer.to_string(),
        difficulty: (!difficulty.is_empty()).then(|| difficulty.to_string()),
    })
}
