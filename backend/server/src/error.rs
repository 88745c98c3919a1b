use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bank::payloads::ErrorResponse;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Messages are required")]
    MissingMessages,

    #[error("{0} is not configured")]
    Configuration(&'static str),

    #[error("{0}")]
    Relay(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload | AppError::MissingMessages => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
