use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State as AxumState,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bank::payloads::ChatResponse;

use crate::{error::AppError, state::State, utils::get_chat_request};

pub async fn chat_handler(AxumState(state): AxumState<Arc<State>>, body: Bytes) -> Response {
    match relay_chat(&state, &body).await {
        Ok(message) => (StatusCode::OK, Json(ChatResponse { message })).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn relay_chat(state: &State, body: &Bytes) -> Result<String, AppError> {
    state.relay.ensure_configured()?;

    let request = get_chat_request(body)?;

    state.relay.relay(request).await
}
