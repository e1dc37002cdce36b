//! Core error types for `TubeScout`.

use thiserror::Error;

/// Core error type for `TubeScout` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid query input (empty credential, malformed locale, etc.).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
