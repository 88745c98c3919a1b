//! # Chatbot
//!
//! Conversation state for the assistant.
//!
//! - Starts with a greeting from the assistant
//! - Each send appends the user turn, relays the whole transcript and appends the reply
//! - Replies are scrubbed of navigation directives before they enter the transcript
//! - Failures append an apology instead of rolling the user turn back
//!
//! `send` takes `&mut self`, so a session can never have two relay calls in flight.
use std::time::Duration;

use bank::{
    CategoryDescriptor, interpret,
    payloads::{CategoryRef, ConversationMessage},
};
use tracing::warn;

use crate::api::ChatBackend;

pub const GREETING: &str = "Hello! I'm your technical interview assistant. Ask me anything about coding, algorithms, system design, or any tech interview topic! You can also ask me to show you practice categories or navigate to a specific category.";
pub const ERROR_PLACEHOLDER: &str = "Sorry, I encountered an error. Please try again or check if the GROQ_API_KEY is configured.";

/// Pause between showing a reply and following its navigation directive.
pub const NAVIGATION_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Blank input, nothing was sent.
    Ignored,
    Message(String),
    Navigate { text: String, slug: String },
    Failed(String),
}

pub struct ChatSession<B> {
    backend: B,
    messages: Vec<ConversationMessage>,
    categories: Vec<CategoryRef>,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B, categories: &[CategoryDescriptor]) -> Self {
        Self {
            backend,
            messages: vec![ConversationMessage::assistant(GREETING)],
            categories: categories.iter().map(CategoryRef::from).collect(),
        }
    }

    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub async fn send(&mut self, input: &str) -> Reply {
        let input = input.trim();
        if input.is_empty() {
            return Reply::Ignored;
        }

        self.messages.push(ConversationMessage::user(input));

        let text = match self.backend.chat(&self.messages, &self.categories).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Chat request failed: {e}");
                self.messages
                    .push(ConversationMessage::assistant(ERROR_PLACEHOLDER));
                return Reply::Failed(ERROR_PLACEHOLDER.to_string());
            }
        };

        let interpretation = interpret(&text);
        self.messages.push(ConversationMessage::assistant(
            interpretation.display_text.clone(),
        ));

        match interpretation.navigation() {
            Some(directive) => Reply::Navigate {
                text: interpretation.display_text.clone(),
                slug: directive.target_slug.clone(),
            },
            None => Reply::Message(interpretation.display_text),
        }
    }
}
