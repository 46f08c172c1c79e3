//! WhatsApp Web bridge client library.
//!
//! This crate provides a Rust client for a locally running WhatsApp Web
//! bridge that exposes a linked session over HTTP. It supports:
//!
//! - Sending text and media messages to chats
//! - Looking up chat metadata
//! - Receiving session events via Server-Sent Events (SSE)
//! - Health checking and connection monitoring
//!
//! # Example
//!
//! ```no_run
//! use wa_gateway::{GatewayConfig, GatewayEvent, WhatsAppClient};
//!
//! # async fn example() -> Result<(), wa_gateway::GatewayError> {
//! let config = GatewayConfig::default();
//! let client = WhatsAppClient::connect(config).await?;
//!
//! client.send_text("919876543210@c.us", "Hello!").await?;
//!
//! use futures::StreamExt;
//! let mut events = wa_gateway::subscribe(&client)?;
//! while let Some(result) = events.next().await {
//!     match result {
//!         Ok(GatewayEvent::Ready) => println!("session ready"),
//!         Ok(GatewayEvent::Message(msg)) => println!("From {}: {}", msg.from, msg.body),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod sse;
pub mod types;

pub use client::WhatsAppClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use sse::{subscribe, EventStream};
pub use types::*;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
