use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Loading timeout. Please refresh the page.")]
    Timeout,

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message}")]
    Relay { status: u16, message: String },

    #[error("Cache error: {0}")]
    Cache(String),
}
