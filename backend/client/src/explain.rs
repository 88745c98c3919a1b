//! Long-form explanations of a single card, fetched through the chat relay.
//!
//! Each language is fetched at most once per card. A failed fetch is not memoised, so asking
//! again retries.
use std::collections::HashMap;

use bank::payloads::ConversationMessage;
use tracing::warn;

use crate::api::ChatBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    En,
    Fr,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Fr,
            Language::Fr => Language::En,
        }
    }

    pub fn prompt(self, question: &str, answer: &str) -> String {
        match self {
            Language::En => format!(
                "Please provide a detailed, easy-to-understand explanation for this technical interview question and answer:\n\nQuestion: {question}\n\nAnswer: {answer}\n\nPlease explain the concepts clearly, provide context, and help me understand this better."
            ),
            Language::Fr => format!(
                "Veuillez fournir une explication détaillée et facile à comprendre pour cette question et réponse d'entretien technique:\n\nQuestion: {question}\n\nRéponse: {answer}\n\nVeuillez expliquer les concepts clairement, fournir du contexte et m'aider à mieux comprendre. Répondez en français."
            ),
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Language::En => "Failed to load explanation. Please try again.",
            Language::Fr => "Échec du chargement de l'explication. Veuillez réessayer.",
        }
    }
}

pub struct Explanation {
    question: String,
    answer: String,
    fetched: HashMap<Language, String>,
}

impl Explanation {
    pub fn new(question: &str, answer: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            fetched: HashMap::new(),
        }
    }

    pub fn cached(&self, language: Language) -> Option<&str> {
        self.fetched.get(&language).map(String::as_str)
    }

    /// Returns the explanation text, or the localized failure message as `Err`.
    pub async fn get(
        &mut self,
        backend: &impl ChatBackend,
        language: Language,
    ) -> Result<&str, &'static str> {
        if !self.fetched.contains_key(&language) {
            let prompt = language.prompt(&self.question, &self.answer);

            let text = backend
                .chat(&[ConversationMessage::user(prompt)], &[])
                .await
                .map_err(|e| {
                    warn!("Explanation request failed: {e}");
                    language.failure_message()
                })?;

            self.fetched.insert(language, text);
        }

        self.cached(language).ok_or(language.failure_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chat::tests::ScriptedBackend, error::ClientError};

    #[test]
    fn test_prompt_embeds_card() {
        let prompt = Language::En.prompt("What is a closure?", "A function with scope.");
        assert!(prompt.contains("Question: What is a closure?\n\nAnswer: A function with scope."));

        let prompt = Language::Fr.prompt("Q", "A");
        assert!(prompt.contains("Question: Q\n\nRéponse: A"));
        assert!(prompt.ends_with("Répondez en français."));
    }

    #[tokio::test]
    async fn test_each_language_fetched_once() {
        let backend = ScriptedBackend::new(vec![
            Ok("english".to_string()),
            Ok("français".to_string()),
        ]);
        let mut explanation = Explanation::new("Q", "A");

        assert_eq!(explanation.get(&backend, Language::En).await, Ok("english"));
        assert_eq!(explanation.get(&backend, Language::Fr).await, Ok("français"));
        assert_eq!(explanation.get(&backend, Language::En).await, Ok("english"));

        let sent = backend.sent.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert!(sent[0].1.is_empty());
        assert_eq!(sent[0].0.len(), 1);
        assert!(sent[1].0[0].content.starts_with("Veuillez"));
    }

    #[tokio::test]
    async fn test_failure_is_localized_and_retried() {
        let backend = ScriptedBackend::new(vec![
            Err(ClientError::Relay {
                status: 500,
                message: "boom".to_string(),
            }),
            Ok("enfin".to_string()),
        ]);
        let mut explanation = Explanation::new("Q", "A");

        assert_eq!(
            explanation.get(&backend, Language::Fr).await,
            Err("Échec du chargement de l'explication. Veuillez réessayer.")
        );
        assert!(explanation.cached(Language::Fr).is_none());
        assert_eq!(explanation.get(&backend, Language::Fr).await, Ok("enfin"));
    }

    #[test]
    fn test_toggle() {
        assert_eq!(Language::default().toggle(), Language::Fr);
        assert_eq!(Language::Fr.toggle(), Language::En);
    }
}
