//! Single-turn chat and legacy completion.
//!
//! Run with:
//! ```bash
//! export OPENAI_API_KEY="your-api-key"
//! cargo run --example chat_simple
//! ```

use ai_toolkit::catalog::{Catalog, ChatModel};
use ai_toolkit::client::Brain;
use ai_toolkit::options::{ChatOptions, CompletionOptions, HttpTransport, TransportOptions};
use ai_toolkit::providers::{ChatBrain, CompletionBrain};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let transport_options =
        TransportOptions::new(HttpTransport::from_env()?).with_timeout(std::time::Duration::from_secs(60));

    let chat_options = ChatOptions::default()
        .with_model(ChatModel::Gpt4oMini)
        .with_temperature(0.7)
        .with_max_tokens(100);
    println!(
        "Model: {} ({})",
        chat_options.model.wire_str(),
        chat_options.model.price_info()
    );

    let chat = ChatBrain::new(chat_options, transport_options.clone());

    println!("Sending chat request...");
    match chat.send("What is the capital of France? Answer in one word.").await {
        Ok(answer) => println!("\n=== Chat ===\n{}", answer),
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e.into());
        }
    }

    // Override the stored options for one call
    let pirate = chat
        .options()
        .clone()
        .with_system_prompt("You answer like a pirate.");
    let answer = chat.send_with_options("Where is the treasure?", &pirate).await?;
    println!("\n=== Chat (pirate) ===\n{}", answer);

    let completion = CompletionBrain::new(CompletionOptions::default(), transport_options);
    let text = completion.send("Write a one-line slogan for a bakery.").await?;
    println!("\n=== Completion ===\n{}", text);

    Ok(())
}
