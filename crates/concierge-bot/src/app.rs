//! Wiring the configured pieces into a running bot.

use std::io;
use std::sync::Arc;

use concierge::{FileAuditTrail, KeepalivePulse, ResponseGenerator, TurnRouter};
use concierge_core::{
    CompletionBackend, ConversationStore, GroundingContext, KnowledgeError, MessageSender,
    PromptTemplate, RoomCatalog,
};
use room_store::RoomStore;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::BotConfig;

/// Errors raised while assembling the bot.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to open rooms table: {0}")]
    Knowledge(#[from] KnowledgeError),

    #[error("failed to read CONTEXT_FILE: {0}")]
    ContextFile(#[from] io::Error),
}

/// Pick the grounding source: rooms table, then context file, then nothing.
pub async fn grounding_context(config: &BotConfig) -> Result<GroundingContext, StartupError> {
    if let Some(ref store_config) = config.room_store {
        info!("Grounding replies on rooms table {}", store_config.table_url());
        let store = RoomStore::new(store_config.clone())?;
        return Ok(GroundingContext::Rooms(Arc::new(store)));
    }

    if let Some(ref path) = config.context_file {
        info!("Grounding replies on {}", path.display());
        return Ok(GroundingContext::from_file(path).await?);
    }

    info!("No grounding source configured; replies use persona and history only");
    Ok(GroundingContext::Static(String::new()))
}

/// The image menu: `ROOM_CATALOG`, else the rooms table by rate, else the
/// built-in rooms.
pub async fn room_catalog(config: &BotConfig, context: &GroundingContext) -> RoomCatalog {
    if let Some(ref catalog) = config.catalog {
        return catalog.clone();
    }

    if let GroundingContext::Rooms(source) = context {
        match source.list_rooms_by_ascending_rate().await {
            Ok(rooms) if !rooms.is_empty() => {
                info!("Image menu built from {} rooms in the rooms table", rooms.len());
                return RoomCatalog::from_rooms(&rooms);
            }
            Ok(_) => warn!("Rooms table is empty; using the built-in image menu"),
            Err(e) => warn!("Could not load rooms for the image menu: {}", e),
        }
    }

    RoomCatalog::default()
}

/// Build the turn router around a backend and a sender.
pub fn build_router(
    config: &BotConfig,
    catalog: RoomCatalog,
    backend: Arc<dyn CompletionBackend>,
    context: GroundingContext,
    sender: Arc<dyn MessageSender>,
) -> TurnRouter {
    let store = Arc::new(ConversationStore::new(config.max_history));
    let responder = ResponseGenerator::new(backend, context, store)
        .with_template(PromptTemplate::for_resort(&config.profile));

    TurnRouter::new(
        responder,
        sender,
        Arc::new(FileAuditTrail::new(&config.audit_log_path)),
    )
    .with_catalog(catalog)
    .with_images_dir(config.images_dir())
    .with_profile(config.profile.clone())
}

/// The heartbeat pulse, if a peer is configured.
pub fn keepalive(config: &BotConfig, sender: Arc<dyn MessageSender>) -> Option<KeepalivePulse> {
    config.keepalive_peer.as_ref().map(|peer| {
        KeepalivePulse::new(sender, peer.clone()).with_period(config.keepalive_interval)
    })
}
