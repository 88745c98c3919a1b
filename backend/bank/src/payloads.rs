//! # Payloads
//!
//! JSON bodies exchanged with the chat relay.
//!
//! ### To relay
//! - `messages`: ordered transcript, roles `user` or `assistant`
//! - `categories`: known categories, only `id` and `name` are read
//!
//! ### From relay
//! - 2xx: `{ "message": string }`
//! - otherwise: `{ "error": string }`
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::categories::CategoryDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub id: String,
    pub name: String,
}

impl From<&CategoryDescriptor> for CategoryRef {
    fn from(category: &CategoryDescriptor) -> Self {
        Self {
            id: category.id.clone(),
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// `None` when the field is missing or null, rejected by the relay.
    #[serde(default)]
    pub messages: Option<Vec<ConversationMessage>>,
    #[serde(default)]
    pub categories: Vec<CategoryRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
