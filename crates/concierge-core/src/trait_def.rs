//! Backend trait definitions.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CompletionError;

/// A hosted text-generation backend.
///
/// Implementations take a fully assembled prompt and return the generated
/// text. Rate-limit responses must be reported as
/// [`CompletionError::RateLimited`] carrying the backend's advisory delay so
/// the retry policy can honour it. This trait is object-safe and is used as
/// `Arc<dyn CompletionBackend>`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Generate a completion for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Get a human-readable name for this backend.
    fn name(&self) -> &str;
}

/// Something that can wait for a duration.
///
/// The retry policy sleeps through this seam so tests can observe the
/// advisory delays without actually waiting.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Wait for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
