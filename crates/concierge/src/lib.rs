//! Conversational turn handling for the resort concierge bot.
//!
//! This crate provides the [`TurnRouter`] which turns each inbound chat
//! message into exactly one reply, the [`ResponseGenerator`] behind its
//! general-question path, and the [`KeepalivePulse`] that keeps the chat
//! session warm.
//!
//! # Architecture
//!
//! ```text
//! InboundMessage (from message-listener)
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        TURN ROUTER                          │
//! │                                                             │
//! │  0. First contact? → greeting (then keep going)             │
//! │         ↓                                                   │
//! │  1. Image keyword  → numbered room menu                     │
//! │  2. Room # / name  → photos from images/<folder>/           │
//! │  3. Booking word   → fixed booking instructions             │
//! │  4. Otherwise      → ResponseGenerator                      │
//! │                        • grounding context                  │
//! │                        • bounded history                    │
//! │                        • backend under RetryPolicy          │
//! │                        • fallback sentence if exhausted     │
//! └─────────────────────────────────────────────────────────────┘
//!          ↓
//!   MessageSender + AuditTrail
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use concierge::{FileAuditTrail, LoggingSender, ResponseGenerator, TurnRouter};
//! use concierge_core::{ConversationStore, GroundingContext, InboundMessage};
//!
//! let store = Arc::new(ConversationStore::default());
//! let responder = ResponseGenerator::new(backend, GroundingContext::Static(String::new()), store);
//! let router = TurnRouter::new(responder, Arc::new(LoggingSender), Arc::new(FileAuditTrail::new("log.txt")));
//!
//! let outcome = router.handle(&InboundMessage::text("919876543210@c.us", "photos", 0)).await?;
//! ```

mod audit;
mod keepalive;
pub mod replies;
mod responder;
mod router;
mod sender;

pub use audit::{FileAuditTrail, DEFAULT_AUDIT_PATH};
pub use keepalive::{KeepalivePulse, DEFAULT_KEEPALIVE_PERIOD};
pub use responder::{Generated, ResponseGenerator};
pub use router::{classify, Intent, TurnAction, TurnOutcome, TurnRouter, DEFAULT_IMAGES_DIR};
pub use sender::LoggingSender;

// Re-export commonly used types from dependencies
pub use concierge_core::{
    AuditEntry, AuditTrail, InboundMessage, MessageSender, ReplyKind, SendError,
};
