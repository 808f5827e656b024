//! Host client error types

use thiserror::Error;

/// Host client error type
#[derive(Debug, Error)]
pub enum HostError {
    /// HTTP request failed (transport level)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with a non-success envelope or status
    #[error("host error {code}: {message}")]
    Status { code: u16, message: String },

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HostError {
    /// Whether this error is a definitive "does not exist" answer
    /// rather than a transport failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, HostError::Status { code, .. } if *code == 404)
    }
}

/// Result type for host operations
pub type HostResult<T> = Result<T, HostError>;
