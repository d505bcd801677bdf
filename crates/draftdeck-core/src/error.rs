//! Error types shared across the core.

use thiserror::Error;

/// Failures talking to the content service.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Server responded with {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Failures of the link preview and source import flows.
///
/// URL problems are caught before any request is sent.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Api(#[from] ApiError),
}
