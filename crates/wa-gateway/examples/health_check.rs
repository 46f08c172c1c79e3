//! Simple health check example.
//!
//! Run with: cargo run -p wa-gateway --example health_check
//!
//! Reads WA_GATEWAY_URL and WA_SESSION from the environment (or .env).

use wa_gateway::{GatewayConfig, WhatsAppClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let config = GatewayConfig::from_env();
    println!("Connecting to {} (session {})...", config.base_url, config.session);

    let client = WhatsAppClient::connect(config).await?;
    println!("Connected!");

    let healthy = client.health_check().await?;
    println!("Health check: {}", if healthy { "OK" } else { "FAILED" });

    if let Some(peer) = std::env::args().nth(1) {
        let chat = client.get_chat(&peer).await?;
        println!(
            "Chat {}: {} (group: {})",
            chat.id,
            chat.name.as_deref().unwrap_or("(unnamed)"),
            chat.is_group
        );
    }

    Ok(())
}
