//! # Chat Relay
//!
//! Thin passthrough to an OpenAI-compatible chat completion endpoint (Groq by default).
//!
//! ## Request
//! - System prompt first: assistant persona, plus the category list and the
//!   `[NAVIGATE:<slug>]` instruction when categories are supplied
//! - Caller transcript appended unchanged
//! - Fixed model, temperature and output cap from [`ChatConfig`]
//!
//! ## Failures
//! - No credential: configuration error, nothing sent upstream
//! - Missing or empty transcript: input error, nothing sent upstream
//! - Anything upstream: relay error carrying the provider text when there is one
use std::sync::Arc;

use async_trait::async_trait;
use bank::payloads::{CategoryRef, ChatRequest, ConversationMessage, Role};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::{config::ChatConfig, error::AppError};

pub const CREDENTIAL_NAME: &str = "GROQ_API_KEY";
pub const EMPTY_COMPLETION: &str = "No response generated";

const BASE_PROMPT: &str = "You are a helpful technical interview assistant. Help users understand technical interview questions, provide explanations, and give coding tips. Be concise and clear.";
const NAVIGATION_HINT: &str = "You can also help users navigate to practice categories. When they ask about a category or want to practice it, use the [NAVIGATE:slug] format in your response.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelayError {
    #[error("{0}")]
    Network(String),

    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("{0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl From<ConversationMessage> for PromptMessage {
    fn from(message: ConversationMessage) -> Self {
        let role = match message.role {
            Role::User => PromptRole::User,
            Role::Assistant => PromptRole::Assistant,
        };

        Self {
            role,
            content: message.content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<PromptMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Text of the first choice, `None` when the provider returned no content.
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, RelayError>;
}

pub struct OpenAiCompatible {
    client: Client,
    api_url: String,
    api_key: String,
}

impl OpenAiCompatible {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

pub fn parse_http_error(status: u16, body: &str) -> RelayError {
    let message = serde_json::from_str::<ProviderErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| format!("HTTP {status}: {body}"));

    RelayError::Provider { status, message }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatible {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, RelayError> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &body));
        }

        let completion: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| RelayError::Parse(format!("Failed to parse response: {e}")))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}

pub fn system_prompt(categories: &[CategoryRef]) -> String {
    let mut prompt = BASE_PROMPT.to_string();

    if !categories.is_empty() {
        let listing: Vec<String> = categories
            .iter()
            .map(|category| format!("- {} (slug: {})", category.name, category.id))
            .collect();

        prompt.push_str("\n\nAvailable practice categories:\n");
        prompt.push_str(&listing.join("\n"));
        prompt.push_str(
            "\n\nWhen a user asks to practice a specific category, navigate to it, or wants to see \
             questions from a category, respond with a special format: [NAVIGATE:category-slug] \
             where category-slug is the slug from the list above. For example, if they want Web \
             Development, use [NAVIGATE:webdev]. Always include helpful text before the \
             navigation command.",
        );
    }

    prompt.push_str("\n\n");
    prompt.push_str(NAVIGATION_HINT);
    prompt
}

pub struct ChatRelay {
    provider: Option<Arc<dyn CompletionProvider>>,
    config: ChatConfig,
}

impl ChatRelay {
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, config: ChatConfig) -> Self {
        Self { provider, config }
    }

    pub fn from_config(client: Client, config: ChatConfig) -> Self {
        let provider = config.api_key.as_ref().map(|key| {
            Arc::new(OpenAiCompatible::new(client, &config.api_url, key))
                as Arc<dyn CompletionProvider>
        });

        if provider.is_none() {
            warn!("{CREDENTIAL_NAME} is not configured, chat requests will fail");
        }

        Self::new(provider, config)
    }

    pub fn ensure_configured(&self) -> Result<&dyn CompletionProvider, AppError> {
        self.provider
            .as_deref()
            .ok_or(AppError::Configuration(CREDENTIAL_NAME))
    }

    pub fn build_request(
        &self,
        messages: Vec<ConversationMessage>,
        categories: &[CategoryRef],
    ) -> CompletionRequest {
        let mut prompt = Vec::with_capacity(messages.len() + 1);
        prompt.push(PromptMessage {
            role: PromptRole::System,
            content: system_prompt(categories),
        });
        prompt.extend(messages.into_iter().map(PromptMessage::from));

        CompletionRequest {
            model: self.config.model.clone(),
            messages: prompt,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    pub async fn relay(&self, request: ChatRequest) -> Result<String, AppError> {
        let provider = self.ensure_configured()?;

        let messages = match request.messages {
            Some(messages) if !messages.is_empty() => messages,
            _ => return Err(AppError::MissingMessages),
        };

        let completion = self.build_request(messages, &request.categories);
        info!(
            "Relaying {} messages with {} categories",
            completion.messages.len() - 1,
            request.categories.len()
        );

        let text = provider.complete(&completion).await.map_err(|e| {
            warn!("Chat provider error: {e}");
            AppError::Relay(e.to_string())
        })?;

        Ok(text
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| EMPTY_COMPLETION.to_string()))
    }
}
