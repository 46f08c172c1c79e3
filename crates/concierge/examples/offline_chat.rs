//! Chat with the concierge from the terminal without WhatsApp.
//!
//! Run with: cargo run -p concierge --example offline_chat
//!
//! Replies are echoed by a stand-in backend and printed through the
//! logging sender, so no API keys are needed.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use concierge::{FileAuditTrail, LoggingSender, ResponseGenerator, TurnRouter};
use concierge_core::{ConversationStore, GroundingContext, InboundMessage};
use mock_brain::EchoBackend;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "concierge=info".into()),
        )
        .init();

    let store = Arc::new(ConversationStore::default());
    let responder = ResponseGenerator::new(
        Arc::new(EchoBackend::with_prefix("You asked: ")),
        GroundingContext::Static(String::new()),
        store,
    );
    let audit_path = std::env::temp_dir().join("concierge-offline-log.txt");
    let router = TurnRouter::new(
        responder,
        Arc::new(LoggingSender),
        Arc::new(FileAuditTrail::new(&audit_path)),
    );

    println!("Type a message (Ctrl+D to quit). Audit log: {}", audit_path.display());
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let outcome = router
            .handle(&InboundMessage::text("offline@c.us", line.trim_end(), 0))
            .await?;
        println!("{:?}", outcome.action);
    }

    Ok(())
}
