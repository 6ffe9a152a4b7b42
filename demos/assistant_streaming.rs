//! Streamed reply from an OpenAI assistant.
//!
//! Run with:
//! ```bash
//! export OPENAI_API_KEY="your-api-key"
//! export OPENAI_ASSISTANT_ID="asst_..."
//! cargo run --example assistant_streaming
//! ```

use std::io::Write;

use ai_toolkit::client::{Brain, StreamingBrain};
use ai_toolkit::options::{AssistantOptions, HttpTransport, TransportOptions};
use ai_toolkit::providers::AssistantBrain;
use futures::StreamExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let assistant_id = std::env::var("OPENAI_ASSISTANT_ID")
        .map_err(|_| "OPENAI_ASSISTANT_ID environment variable must be set")?;

    let brain = AssistantBrain::new(
        AssistantOptions::new(assistant_id),
        TransportOptions::new(HttpTransport::from_env()?),
    );

    println!("Streaming response from assistant...\n");

    let mut stream = brain.send_stream("Tell me a short joke.").await?;
    print!("Response: ");
    while let Some(delta) = stream.next().await {
        match delta {
            Ok(text) => {
                print!("{}", text);
                std::io::stdout().flush()?;
            }
            Err(e) => {
                eprintln!("\nStream error: {}", e);
                break;
            }
        }
    }
    println!();

    // Keep one thread for a follow-up question
    let thread_id = brain.create_thread().await?;
    for question in ["My name is Alice.", "What's my name?"] {
        let mut stream = brain.send_in_thread(&thread_id, question).await?;
        print!("\n> {}\n", question);
        while let Some(delta) = stream.next().await {
            print!("{}", delta?);
            std::io::stdout().flush()?;
        }
        println!();
    }

    Ok(())
}
