//! WhatsApp-native message listener for the concierge bot.
//!
//! This crate wires the bridge's event stream to a [`TurnRouter`]:
//!
//! - [`MessageProcessor`] filters inbound events, converts them to
//!   [`InboundMessage`]s and handles each one on its own task
//! - [`WhatsAppSender`] implements [`MessageSender`] over a
//!   [`WhatsAppClient`]
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use message_listener::{MessageProcessor, ProcessorConfig, WhatsAppSender};
//! use wa_gateway::{GatewayConfig, WhatsAppClient};
//!
//! let client = WhatsAppClient::connect(GatewayConfig::from_env()).await?;
//! let sender = Arc::new(WhatsAppSender::new(client.clone()));
//! let router = build_router(sender.clone());
//!
//! let events = wa_gateway::subscribe(&client)?;
//! MessageProcessor::new(router, ProcessorConfig::default())
//!     .run_with_shutdown(events, async { let _ = tokio::signal::ctrl_c().await; })
//!     .await?;
//! ```
//!
//! [`TurnRouter`]: concierge::TurnRouter
//! [`InboundMessage`]: concierge_core::InboundMessage
//! [`MessageSender`]: concierge_core::MessageSender
//! [`WhatsAppClient`]: wa_gateway::WhatsAppClient

mod processor;
mod sender;

pub use processor::{to_inbound, MessageProcessor, ProcessResult, ProcessorConfig, ProcessorError};
pub use sender::WhatsAppSender;

/// Re-export commonly used types for convenience.
pub use wa_gateway::{GatewayError, GatewayEvent, WaMessage, WhatsAppClient};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
