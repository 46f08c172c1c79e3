//! Application state shared across handlers.

use std::sync::Arc;

use concierge_core::RoomCatalog;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Rooms offered in the image menu.
    pub catalog: Arc<RoomCatalog>,
}

impl AppState {
    /// Create new application state.
    pub fn new(catalog: RoomCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
