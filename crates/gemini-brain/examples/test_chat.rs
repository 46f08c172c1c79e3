//! Simple test for GeminiBrain completion.
//!
//! Run with: cargo run -p gemini-brain --example test_chat
//! Or with a custom prompt: cargo run -p gemini-brain --example test_chat -- "Your prompt here"
//!
//! Make sure to set environment variables in .env:
//!   GEMINI_API_KEY - Google AI Studio key

use gemini_brain::{CompletionBackend, CompletionError, GeminiBrain};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let args: Vec<String> = env::args().collect();
    let prompt = if args.len() > 1 {
        args[1..].join(" ")
    } else {
        "You are a friendly resort concierge. Greet a guest in one sentence.".to_string()
    };

    println!("Initializing GeminiBrain...");
    let brain = GeminiBrain::from_env()?;

    println!("Brain initialized: {}", brain.name());
    println!("API URL: {}", brain.config().api_url);
    println!("Model: {}", brain.config().model);
    println!();

    println!("Sending: \"{}\"", prompt);
    println!("Waiting for response...\n");

    match brain.complete(&prompt).await {
        Ok(text) => {
            println!("=== Response ===");
            println!("{}", text);
            println!("================");
        }
        Err(CompletionError::RateLimited { retry_after }) => {
            println!("Rate limited; server asks us to wait {:?}", retry_after);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
