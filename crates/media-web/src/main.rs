//! Standalone media server for the resort concierge bot.

use concierge_core::RoomCatalog;
use media_web::MediaConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = MediaConfig::from_env()?;
    let catalog = match std::env::var("ROOM_CATALOG") {
        Ok(spec) => RoomCatalog::parse(&spec)?,
        Err(_) => RoomCatalog::default(),
    };
    info!(addr = %config.addr, rooms = catalog.len(), "Starting media server");

    media_web::serve(config, catalog).await?;

    Ok(())
}
