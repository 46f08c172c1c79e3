//! Inbound chat message type.

use serde::{Deserialize, Serialize};

/// A chat message received from a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform message id, if the transport supplied one.
    pub id: Option<String>,
    /// Sender address (e.g. `919876543210@c.us`). Used only as a key.
    pub sender: String,
    /// Message body as typed by the user.
    pub text: String,
    /// Seconds since the epoch, as reported by the transport.
    pub timestamp: u64,
    /// Whether the message carried media.
    pub has_media: bool,
    /// Transport media type (`image`, `ptt`, ...), if any.
    pub media_type: Option<String>,
}

impl InboundMessage {
    /// Create a plain text message.
    pub fn text(sender: impl Into<String>, text: impl Into<String>, timestamp: u64) -> Self {
        Self {
            id: None,
            sender: sender.into(),
            text: text.into(),
            timestamp,
            has_media: false,
            media_type: None,
        }
    }

    /// Attach media metadata.
    pub fn with_media(mut self, media_type: impl Into<String>) -> Self {
        self.has_media = true;
        self.media_type = Some(media_type.into());
        self
    }

    /// The trimmed, lowercased body used for intent matching.
    pub fn normalized(&self) -> String {
        self.text.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_and_lowercases() {
        let msg = InboundMessage::text("1@c.us", "  Show me PHOTOS \n", 0);
        assert_eq!(msg.normalized(), "show me photos");
    }

    #[test]
    fn test_with_media() {
        let msg = InboundMessage::text("1@c.us", "", 0).with_media("image");
        assert!(msg.has_media);
        assert_eq!(msg.media_type.as_deref(), Some("image"));
    }
}
