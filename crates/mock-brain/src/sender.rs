//! Sender that captures outbound traffic.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use concierge_core::{async_trait, MessageSender, SendError};

/// One captured send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { peer: String, text: String },
    Media { peer: String, path: PathBuf },
}

/// Records every send; can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<Sent>>,
    fail_text: bool,
    fail_media: HashSet<PathBuf>,
    unknown_chats: HashSet<String>,
}

impl RecordingSender {
    /// Create a sender that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sender whose text sends all fail.
    pub fn failing_text() -> Self {
        Self {
            fail_text: true,
            ..Self::default()
        }
    }

    /// Fail media sends for this file.
    pub fn fail_media_for(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_media.insert(path.into());
        self
    }

    /// Report this peer as having no chat.
    pub fn without_chat(mut self, peer: impl Into<String>) -> Self {
        self.unknown_chats.insert(peer.into());
        self
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Text bodies sent so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Text { text, .. } => Some(text),
                Sent::Media { .. } => None,
            })
            .collect()
    }

    /// Media paths sent so far, in order.
    pub fn media(&self) -> Vec<PathBuf> {
        self.sent()
            .into_iter()
            .filter_map(|sent| match sent {
                Sent::Media { path, .. } => Some(path),
                Sent::Text { .. } => None,
            })
            .collect()
    }

    fn push(&self, sent: Sent) {
        if let Ok(mut log) = self.sent.lock() {
            log.push(sent);
        }
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send_text(&self, peer: &str, text: &str) -> Result<(), SendError> {
        if self.fail_text {
            return Err(SendError::Transport("session closed".to_string()));
        }
        self.push(Sent::Text {
            peer: peer.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn send_media(&self, peer: &str, path: &Path) -> Result<(), SendError> {
        if self.fail_media.contains(path) {
            return Err(SendError::Media(path.display().to_string()));
        }
        self.push(Sent::Media {
            peer: peer.to_string(),
            path: path.to_path_buf(),
        });
        Ok(())
    }

    async fn get_chat(&self, peer: &str) -> Result<String, SendError> {
        if self.unknown_chats.contains(peer) {
            return Err(SendError::UnknownChat(peer.to_string()));
        }
        Ok(peer.to_string())
    }
}
