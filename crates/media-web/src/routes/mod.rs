//! Route handlers for the media server.

pub mod health;
pub mod rooms;

use std::path::Path;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the router with all routes.
///
/// Anything not matched by an API route is looked up under `images_dir`,
/// so `/pool_villa/1.jpg` serves `<images_dir>/pool_villa/1.jpg`.
pub fn router(state: AppState, images_dir: &Path) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // API endpoints
        .route("/api/rooms", get(rooms::rooms_api))
        .fallback_service(ServeDir::new(images_dir))
        .with_state(state)
}
