//! Audit trail entries.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

/// Failure writing the audit trail.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The underlying file could not be written.
    #[error("audit write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Which handler produced a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Greeting,
    ImageMenu,
    Booking,
    Ai,
    Fallback,
}

impl ReplyKind {
    /// Tag written to the audit trail.
    pub fn tag(&self) -> &'static str {
        match self {
            ReplyKind::Greeting => "Greeting",
            ReplyKind::ImageMenu => "image menu",
            ReplyKind::Booking => "Booking",
            ReplyKind::Ai => "AI",
            ReplyKind::Fallback => "Fallback",
        }
    }
}

/// One line of the audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEntry {
    /// A message arrived.
    Inbound { sender: String, text: String },
    /// The bot replied with text.
    Reply { kind: ReplyKind, text: String },
    /// The bot sent an image file.
    ImageSent { path: PathBuf },
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditEntry::Inbound { sender, text } => {
                write!(f, "📩 Message from {}: {}", sender, text)
            }
            AuditEntry::Reply { kind, text } => {
                write!(f, "🤖 Bot Reply ({}):\n{}", kind.tag(), text)
            }
            AuditEntry::ImageSent { path } => write!(f, "🖼️ Sent image: {}", path.display()),
        }
    }
}

/// Append-only record of what the bot saw and said.
#[async_trait]
pub trait AuditTrail: Send + Sync {
    /// Append an entry.
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_display() {
        let inbound = AuditEntry::Inbound {
            sender: "111@c.us".to_string(),
            text: "Hi".to_string(),
        };
        assert_eq!(inbound.to_string(), "📩 Message from 111@c.us: Hi");

        let reply = AuditEntry::Reply {
            kind: ReplyKind::ImageMenu,
            text: "menu".to_string(),
        };
        assert_eq!(reply.to_string(), "🤖 Bot Reply (image menu):\nmenu");

        let image = AuditEntry::ImageSent {
            path: PathBuf::from("images/pool_villa/1.jpg"),
        };
        assert_eq!(image.to_string(), "🖼️ Sent image: images/pool_villa/1.jpg");
    }
}
