//! Outbound transport seam.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by an outbound transport.
#[derive(Debug, Error)]
pub enum SendError {
    /// The session refused or failed the send.
    #[error("transport failure: {0}")]
    Transport(String),

    /// A media file could not be read.
    #[error("media unavailable: {0}")]
    Media(String),

    /// The peer could not be resolved to a chat.
    #[error("unknown chat: {0}")]
    UnknownChat(String),
}

/// Trait for sending replies to chat peers.
///
/// Abstracted to support different transports (WhatsApp bridge, tests, etc.)
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Send a text message.
    async fn send_text(&self, peer: &str, text: &str) -> Result<(), SendError>;

    /// Send a local file as a media message.
    async fn send_media(&self, peer: &str, path: &Path) -> Result<(), SendError>;

    /// Resolve a peer address to the chat id messages should go to.
    ///
    /// Default implementation treats the address as the chat id.
    async fn get_chat(&self, peer: &str) -> Result<String, SendError> {
        Ok(peer.to_string())
    }
}
