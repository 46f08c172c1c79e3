//! Error types shared across the concierge crates.

use std::time::Duration;

use thiserror::Error;

/// Errors reported by a completion backend.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The backend asked us to slow down and suggested how long to wait.
    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// Advisory delay from the backend.
        retry_after: Duration,
    },

    /// Any other failure. Never retried.
    #[error("completion failed: {0}")]
    Other(String),
}

impl CompletionError {
    /// Whether this error is the backend's rate-limit signal.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, CompletionError::RateLimited { .. })
    }
}

/// Errors reported by a knowledge source.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    /// The source could not be reached or answered with an error.
    #[error("knowledge source unavailable: {0}")]
    Unavailable(String),

    /// The source answered with records we could not understand.
    #[error("malformed room data: {0}")]
    Malformed(String),
}
