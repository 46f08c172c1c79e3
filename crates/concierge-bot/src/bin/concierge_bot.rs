use std::sync::Arc;

use concierge_bot::{
    build_router, grounding_context, keepalive, logging, room_catalog, BotConfig,
};
use concierge_core::MessageSender;
use gemini_brain::GeminiBrain;
use message_listener::{MessageProcessor, ProcessorConfig, WhatsAppSender};
use tracing::{error, info, warn};
use wa_gateway::WhatsAppClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = BotConfig::from_env()?;
    let _log_guard = logging::init(config.log_dir.as_deref());

    info!(
        "Starting concierge bot v{} for {}",
        concierge_bot::version(),
        config.profile.name
    );

    let backend = Arc::new(GeminiBrain::new(config.gemini.clone())?);
    let context = grounding_context(&config).await?;
    let catalog = room_catalog(&config, &context).await;

    info!(
        "Connecting to WhatsApp bridge at {} (session {})",
        config.gateway.base_url, config.gateway.session
    );
    let client = WhatsAppClient::connect(config.gateway.clone()).await?;
    let sender: Arc<dyn MessageSender> = Arc::new(WhatsAppSender::new(client.clone()));

    let router = build_router(
        &config,
        catalog.clone(),
        backend,
        context,
        Arc::clone(&sender),
    );

    let media_config = config.media.clone();
    tokio::spawn(async move {
        if let Err(e) = media_web::serve(media_config, catalog).await {
            error!("Media server stopped: {}", e);
        }
    });

    let processor_config = match config.gateway.bot_id.clone() {
        Some(id) => ProcessorConfig::with_bot_id(id),
        None => ProcessorConfig::default(),
    };
    let mut processor = MessageProcessor::new(router, processor_config);
    match keepalive(&config, sender) {
        Some(pulse) => processor = processor.with_keepalive(pulse),
        None => warn!("KEEPALIVE_PEER not set; keepalive disabled"),
    }

    let events = wa_gateway::subscribe(&client)?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    processor.run_with_shutdown(events, shutdown).await?;
    info!("Concierge bot stopped");

    Ok(())
}
