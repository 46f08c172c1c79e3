//! Media server for the resort concierge bot.
//!
//! Serves the per-room image folders over HTTP so operators can check what
//! guests will receive, plus a health probe and the room catalog as JSON.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use concierge_core::RoomCatalog;
use tracing::info;

pub use config::{ConfigError, MediaConfig, DEFAULT_PORT};
pub use error::{MediaError, Result};
pub use state::AppState;

/// Bind and serve until the process exits.
pub async fn serve(config: MediaConfig, catalog: RoomCatalog) -> Result<()> {
    let app = routes::router(AppState::new(catalog), &config.images_dir);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(
        addr = %config.addr,
        images = %config.images_dir.display(),
        "Media server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
