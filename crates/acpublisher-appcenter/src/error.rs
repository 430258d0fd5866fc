//! Client error types

use thiserror::Error;

/// Errors raised while publishing a release
#[derive(Debug, Error)]
pub enum AppCenterError {
    /// Connection could not be established or the response could not be read
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Server answered with a status other than the documented one
    #[error("Unexpected response from server: {0}")]
    UnexpectedStatus(u16),

    /// Response body did not parse into the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Binary transfer to a pre-signed destination failed
    #[error("Transfer failed: {0}")]
    Transfer(String),
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, AppCenterError>;
