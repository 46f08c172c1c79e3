//! Core traits and types for the resort concierge bot.
//!
//! This crate provides the shared vocabulary used by every other crate in
//! the workspace. It defines:
//!
//! - [`CompletionBackend`] - The trait implemented by hosted text-generation backends
//! - [`KnowledgeSource`] / [`GroundingContext`] - Where reply grounding comes from
//! - [`ConversationStore`] - Per-sender bounded history and first-contact flags
//! - [`RetryPolicy`] - The bounded, advisory-delay retry state machine
//! - [`RoomOption`] / [`RoomCatalog`] - Room records and the numbered image menu
//! - [`MessageSender`] / [`AuditTrail`] - Outbound transport and audit seams
//!
//! # Example
//!
//! ```rust
//! use concierge_core::{async_trait, CompletionBackend, CompletionError};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl CompletionBackend for Canned {
//!     async fn complete(&self, _prompt: &str) -> Result<String, CompletionError> {
//!         Ok("🌿 Happy to help!".to_string())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Canned"
//!     }
//! }
//! ```

mod audit;
mod error;
mod history;
mod knowledge;
mod message;
mod profile;
mod prompt;
mod retry;
mod room;
mod sender;
mod trait_def;

pub use audit::{AuditEntry, AuditError, AuditTrail, ReplyKind};
pub use error::{CompletionError, KnowledgeError};
pub use history::{ConversationStore, ConversationTurn, Role, DEFAULT_MAX_TURNS};
pub use knowledge::{GroundingContext, KnowledgeSource};
pub use message::InboundMessage;
pub use profile::ResortProfile;
pub use prompt::{hash_prompt, render_history, PromptTemplate};
pub use retry::{RetryOutcome, RetryPolicy, RetryState, DEFAULT_MAX_RETRIES};
pub use room::{
    folder_key_for, render_rooms, CatalogEntry, CatalogParseError, RoomCatalog, RoomOption,
};
pub use sender::{MessageSender, SendError};
pub use trait_def::{CompletionBackend, Sleeper, TokioSleeper};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
