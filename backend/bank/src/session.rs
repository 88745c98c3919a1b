//! # Practice Sessions
//!
//! One shuffled pass over a single domain with circular navigation.
//!
//! The shuffle is unseeded so every session gets a fresh order. An empty domain never
//! produces a session, which is how callers tell "no questions for this domain" apart.
use rand::{seq::SliceRandom, thread_rng};

use crate::{categories::display_name, questions::QuestionRecord};

#[derive(Debug, Clone)]
pub struct PracticeSession {
    domain: String,
    questions: Vec<QuestionRecord>,
    index: usize,
}

pub fn questions_for_domain<'q>(
    questions: &'q [QuestionRecord],
    domain: &str,
) -> impl Iterator<Item = &'q QuestionRecord> {
    let domain = domain.to_lowercase();

    questions
        .iter()
        .filter(move |question| question.domain.to_lowercase() == domain)
}

impl PracticeSession {
    pub fn start(questions: &[QuestionRecord], domain: &str) -> Option<Self> {
        let mut selected: Vec<QuestionRecord> =
            questions_for_domain(questions, domain).cloned().collect();

        if selected.is_empty() {
            return None;
        }

        selected.shuffle(&mut thread_rng());

        Some(Self {
            domain: domain.to_lowercase(),
            questions: selected,
            index: 0,
        })
    }

    pub fn domain_name(&self) -> &str {
        display_name(&self.domain)
    }

    pub fn current(&self) -> &QuestionRecord {
        &self.questions[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false, sessions are never built over an empty domain.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    /// `3 / 10`
    pub fn position(&self) -> String {
        format!("{} / {}", self.index + 1, self.len())
    }

    pub fn advance(&mut self) -> &QuestionRecord {
        self.index = (self.index + 1) % self.len();
        self.current()
    }

    pub fn retreat(&mut self) -> &QuestionRecord {
        self.index = match self.index {
            0 => self.len() - 1,
            index => index - 1,
        };
        self.current()
    }
}
