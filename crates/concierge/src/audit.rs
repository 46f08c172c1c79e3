//! File-backed audit trail.

use std::path::{Path, PathBuf};

use chrono::Local;
use concierge_core::{async_trait, AuditEntry, AuditError, AuditTrail};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Default audit file name.
pub const DEFAULT_AUDIT_PATH: &str = "log.txt";

/// Appends `[<local timestamp>] <entry>` lines to a text file.
#[derive(Debug)]
pub struct FileAuditTrail {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileAuditTrail {
    /// Create a trail writing to `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// The file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AuditTrail for FileAuditTrail {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        let line = format!("[{}] {}\n", Local::now().format("%Y-%m-%d %H:%M:%S"), entry);

        // Serialise writers so concurrent turns never interleave lines.
        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::ReplyKind;

    #[tokio::test]
    async fn test_appends_timestamped_lines() {
        let dir = tempfile::tempdir().unwrap();
        let trail = FileAuditTrail::new(dir.path().join("log.txt"));

        trail
            .record(AuditEntry::Inbound {
                sender: "111@c.us".to_string(),
                text: "hi".to_string(),
            })
            .await
            .unwrap();
        trail
            .record(AuditEntry::Reply {
                kind: ReplyKind::Booking,
                text: "call us".to_string(),
            })
            .await
            .unwrap();

        let contents = std::fs::read_to_string(trail.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] 📩 Message from 111@c.us: hi"));
        assert!(lines[1].ends_with("] 🤖 Bot Reply (Booking):"));
        assert_eq!(lines[2], "call us");
    }

    #[tokio::test]
    async fn test_unwritable_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let trail = FileAuditTrail::new(dir.path().join("missing").join("log.txt"));

        let result = trail
            .record(AuditEntry::ImageSent {
                path: PathBuf::from("a.jpg"),
            })
            .await;
        assert!(matches!(result, Err(AuditError::Io(_))));
    }
}
