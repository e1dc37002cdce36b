//! Fetch error types.
//!
//! Remote failures are classified into two layers:
//!
//! - [`ApiError`] is the tagged per-call classification produced by a
//!   [`crate::api::ChannelApi`] implementation. The backoff executor consumes
//!   it: rate limits are retried, transient failures degrade to "no data",
//!   rejections abort.
//! - [`FetchError`] is what crosses the public pipeline boundary. Only hard
//!   failures live here; degraded calls never surface as errors.

use thiserror::Error;

// ============================================================================
// Per-Call Classification
// ============================================================================

/// Classified failure of a single remote call.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The remote service signalled rate limiting (HTTP 403/429).
    ///
    /// Retried by the backoff executor with exponential delays.
    #[error("Rate limited (HTTP {status})")]
    RateLimited {
        /// HTTP status that triggered the classification.
        status: u16,
    },

    /// Any other transient or unknown failure (5xx, transport, undecodable
    /// body). Degrades the affected call to "no data"; never retried.
    #[error("Transient remote failure: {0}")]
    Transient(String),

    /// Unrecoverable protocol rejection (bad credential, malformed request).
    ///
    /// The only classification that aborts the enclosing pipeline.
    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status of the rejection.
        status: u16,
        /// Error message extracted from the response body, if any.
        message: String,
    },
}

// ============================================================================
// Pipeline Errors
// ============================================================================

/// Hard failure of a pipeline invocation.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The remote service rejected a request at the protocol level.
    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected {
        /// HTTP status of the rejection.
        status: u16,
        /// Error message extracted from the response body, if any.
        message: String,
    },

    /// The caller cancelled the invocation.
    #[error("Operation cancelled")]
    Cancelled,

    /// HTTP client construction or request plumbing failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured endpoint URL could not be parsed.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Core error.
    #[error("Core error: {0}")]
    Core(#[from] tubescout_core::CoreError),
}
