//! Wire types exchanged with the WhatsApp bridge.

mod event;
mod send;

pub use event::{GatewayEvent, WaMessage, STATUS_BROADCAST};
pub use send::{ChatInfo, SendMediaParams, SendResult, SendTextParams};
