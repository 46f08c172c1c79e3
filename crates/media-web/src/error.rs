//! Error types for the media server.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that stop the media server.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Bad configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Binding or serving failed.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for media server operations.
pub type Result<T> = std::result::Result<T, MediaError>;
