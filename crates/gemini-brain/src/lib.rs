//! Gemini-based completion backend.
//!
//! This crate provides a [`CompletionBackend`] that sends a single assembled
//! prompt to the Gemini `generateContent` REST endpoint and returns the
//! generated text.
//!
//! # Features
//!
//! - Uses `gemini-1.5-flash` by default for quick, cheap replies
//! - Maps HTTP 429 / `RESOURCE_EXHAUSTED` responses to
//!   [`CompletionError::RateLimited`] carrying the server's advisory delay
//!   (`RetryInfo.retryDelay` or the `Retry-After` header)
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use gemini_brain::{CompletionBackend, GeminiBrain};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let brain = GeminiBrain::from_env()?;
//!     let reply = brain.complete("Say hello to a guest.").await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

mod api_types;
mod brain;
mod config;

pub use brain::{parse_retry_delay, GeminiBrain};
pub use config::{ConfigError, GeminiBrainConfig, GeminiBrainConfigBuilder};

// Re-export core types for convenience
pub use concierge_core::{async_trait, CompletionBackend, CompletionError};
