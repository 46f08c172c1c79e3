//! Resort concierge bot for WhatsApp.
//!
//! This crate loads configuration, installs logging and wires the
//! workspace crates together; the `concierge_bot` binary runs the result.

pub mod app;
pub mod config;
pub mod logging;

pub use app::{build_router, grounding_context, keepalive, room_catalog, StartupError};
pub use config::{BotConfig, BotConfigError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
