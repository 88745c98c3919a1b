use axum::body::Bytes;
use bank::payloads::ChatRequest;
use tracing::debug;

use crate::error::AppError;

pub fn get_chat_request(bytes: &Bytes) -> Result<ChatRequest, AppError> {
    serde_json::from_slice(bytes).map_err(|e| {
        debug!("Rejected chat payload: {e}");
        AppError::MalformedPayload
    })
}
