//! Error types for the client layer.

use thiserror::Error;

/// Errors that can occur while talking to the backend or local storage.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend answered with a non-success status
    #[error("API error on {path}: status {status}, {message}")]
    Api {
        /// Request path relative to the API base
        path: String,
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// Response body could not be decoded
    #[error("failed to parse response from {path}: {message}")]
    Parse {
        /// Request path relative to the API base
        path: String,
        /// Decoder message
        message: String,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Local key-value storage error
    #[error("storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] logibooks_core::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl ClientError {
    /// HTTP status of an API error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
