use async_trait::async_trait;
use bank::{
    QUESTIONS_PATH, QuestionRecord, get_bank_remote,
    payloads::{CategoryRef, ChatRequest, ChatResponse, ConversationMessage, ErrorResponse},
};
use reqwest::Client;

use crate::error::ClientError;

#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(
        &self,
        messages: &[ConversationMessage],
        categories: &[CategoryRef],
    ) -> Result<String, ClientError>;
}

#[async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for &T {
    async fn chat(
        &self,
        messages: &[ConversationMessage],
        categories: &[CategoryRef],
    ) -> Result<String, ClientError> {
        (**self).chat(messages, categories).await
    }
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn questions_url(&self) -> String {
        format!("{}{QUESTIONS_PATH}", self.base_url)
    }

    pub fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    /// Fail-soft, an unreachable server reads as an empty bank.
    pub async fn questions(&self) -> Vec<QuestionRecord> {
        get_bank_remote(&self.questions_url()).await
    }
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn chat(
        &self,
        messages: &[ConversationMessage],
        categories: &[CategoryRef],
    ) -> Result<String, ClientError> {
        let request = ChatRequest {
            messages: Some(messages.to_vec()),
            categories: categories.to_vec(),
        };

        let response = self.http.post(self.chat_url()).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorResponse>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Failed to get response".to_string());

            return Err(ClientError::Relay {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<ChatResponse>().await?.message)
    }
}
