//! Echo bot example using MessageProcessor.
//!
//! Connects to a running WhatsApp bridge and answers every general question
//! by echoing it back, while the menu, photo and booking paths work as in
//! the real bot.
//!
//! Run with: cargo run -p message-listener --example processor_bot --features signal
//!
//! Configuration via .env file or environment variables:
//!   WA_GATEWAY_URL - Bridge URL (default: http://127.0.0.1:3000)
//!   WA_SESSION     - Session name (default: default)
//!   WA_BOT_ID      - Bot's chat id (used to filter self-messages)

use std::sync::Arc;

use concierge::{FileAuditTrail, ResponseGenerator, TurnRouter, DEFAULT_AUDIT_PATH};
use concierge_core::{ConversationStore, GroundingContext};
use message_listener::{MessageProcessor, ProcessorConfig, WhatsAppSender};
use mock_brain::EchoBackend;
use wa_gateway::{GatewayConfig, WhatsAppClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = GatewayConfig::from_env();
    println!("Connecting to {}...", config.base_url);
    let client = WhatsAppClient::connect(config.clone()).await?;
    println!("Connected!");

    let backend = Arc::new(EchoBackend::with_prefix("Echo: "));
    let store = Arc::new(ConversationStore::default());
    let responder =
        ResponseGenerator::new(backend, GroundingContext::Static(String::new()), store);
    let router = TurnRouter::new(
        responder,
        Arc::new(WhatsAppSender::new(client.clone())),
        Arc::new(FileAuditTrail::new(DEFAULT_AUDIT_PATH)),
    );

    let processor_config = match config.bot_id {
        Some(id) => ProcessorConfig::with_bot_id(id),
        None => ProcessorConfig::default(),
    };

    println!("Listening for messages (Ctrl+C to stop)...");
    let events = wa_gateway::subscribe(&client)?;
    MessageProcessor::new(router, processor_config)
        .run_with_shutdown(events, async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}
