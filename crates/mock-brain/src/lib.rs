//! Test doubles for the concierge seams.
//!
//! This crate provides deterministic implementations of the core traits:
//! - `ScriptedBackend` - Replays a fixed script of completion results
//! - `EchoBackend` - Echoes the guest's question back
//! - `FixedKnowledge` / `FailingKnowledge` - Canned room data
//! - `RecordingSender` - Captures every outbound send
//! - `RecordingSleeper` - Records advisory delays without waiting
//! - `MemoryAudit` - Keeps audit entries in memory
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use mock_brain::{ScriptedBackend, Step};
//!
//! let backend = ScriptedBackend::new(vec![
//!     Step::RateLimited(Duration::from_secs(1)),
//!     Step::Reply("🌿 Welcome!".to_string()),
//! ]);
//! assert_eq!(backend.calls(), 0);
//! ```

mod audit;
mod echo;
mod knowledge;
mod scripted;
mod sender;
mod sleeper;

pub use audit::MemoryAudit;
pub use echo::EchoBackend;
pub use knowledge::{FailingKnowledge, FixedKnowledge};
pub use scripted::{ScriptedBackend, Step};
pub use sender::{RecordingSender, Sent};
pub use sleeper::RecordingSleeper;

// Re-export core types for convenience
pub use concierge_core::{async_trait, CompletionBackend, CompletionError};
