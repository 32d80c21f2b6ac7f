//! Error types for the study backend client

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid backend address: {0}")]
    InvalidAddress(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Backend returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No authenticated actor: {0}")]
    MissingActor(String),

    #[error("Session file error: {0}")]
    Session(String),

    #[error("Backend returned invalid data: {0}")]
    InvalidData(String),

    #[error("Mock response not configured for: {0}")]
    NotConfigured(String),
}
