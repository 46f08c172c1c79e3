//! Error types for wa-gateway.

use thiserror::Error;

/// Errors that can occur when talking to the WhatsApp bridge.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a local media file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bridge answered with an error status.
    #[error("Bridge error {status}: {message}")]
    Api { status: u16, message: String },

    /// Bridge health check failed.
    #[error("Health check failed")]
    HealthCheckFailed,

    /// SSE stream error.
    #[error("SSE error: {0}")]
    Sse(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
