//! In-memory audit trail.

use std::io;
use std::sync::Mutex;

use concierge_core::{async_trait, AuditEntry, AuditError, AuditTrail};

/// Keeps audit entries in memory; can be told to fail every write.
#[derive(Debug, Default)]
pub struct MemoryAudit {
    entries: Mutex<Vec<AuditEntry>>,
    broken: bool,
}

impl MemoryAudit {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// A trail whose writes all fail.
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// Entries recorded so far.
    pub fn entries(&self) -> Vec<AuditEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditTrail for MemoryAudit {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        if self.broken {
            return Err(AuditError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "log file is read-only",
            )));
        }
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
        Ok(())
    }
}
