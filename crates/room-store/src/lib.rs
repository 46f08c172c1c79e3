//! Room table knowledge source.
//!
//! Reads room records from a Supabase project through its PostgREST
//! interface and hands them to the concierge as grounding for generated
//! replies. Rooms are always returned cheapest first.

mod config;
mod store;

pub use config::{RoomStoreConfig, DEFAULT_TABLE};
pub use store::{RoomStore, ROOM_COLUMNS};

pub use concierge_core::{KnowledgeError, KnowledgeSource, RoomOption};
