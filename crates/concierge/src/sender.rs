//! Sender implementations that need no transport.

use std::path::Path;

use concierge_core::{async_trait, MessageSender, SendError};
use tracing::info;

/// A logging message sender for dry runs that logs all operations.
#[derive(Debug, Clone, Default)]
pub struct LoggingSender;

#[async_trait]
impl MessageSender for LoggingSender {
    async fn send_text(&self, peer: &str, text: &str) -> Result<(), SendError> {
        info!("[text] to {}: {}", peer, text);
        Ok(())
    }

    async fn send_media(&self, peer: &str, path: &Path) -> Result<(), SendError> {
        info!("[media] to {}: {}", peer, path.display());
        Ok(())
    }
}
