//! # ai-toolkit - OpenAI capability brains
//!
//! A small async library that wraps the OpenAI HTTP APIs behind one uniform
//! contract: each capability is a *brain* that takes typed input and returns
//! typed output.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Chat, legacy completion, image generation, vision
//! - Speech-to-text (WAV upload) and text-to-speech
//! - Assistants v2 threads with streamed replies via Server-Sent Events
//! - Closed model catalogs with wire names and price notes
//!
//! ## Architecture
//!
//! Every brain has a two-tier API:
//!
//! 1. **Static methods** ([`Brain::request`]) for full control with explicit options
//! 2. **Instance methods** ([`Brain::send`]) using the options stored at construction
//!
//! ### Core Types
//!
//! - **Capability options** (`ChatOptions`, `ImageOptions`, ...): model behavior
//! - **`TransportOptions<HttpTransport>`**: credential, base URL, proxy, headers, timeout
//! - **[`ClientError`]**: every failure, returned or logged and never retried
//!
//! ## Example
//! ```no_run
//! use ai_toolkit::catalog::ChatModel;
//! use ai_toolkit::client::Brain;
//! use ai_toolkit::options::{ChatOptions, HttpTransport, TransportOptions};
//! use ai_toolkit::providers::ChatBrain;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ChatOptions::default()
//!         .with_model(ChatModel::Gpt4oMini)
//!         .with_temperature(0.7);
//!     let transport_options = TransportOptions::new(HttpTransport::from_env()?);
//!
//!     let brain = ChatBrain::new(options, transport_options);
//!     let answer = brain.send("What is the capital of France?").await?;
//!     println!("{}", answer);
//!     Ok(())
//! }
//! ```

pub mod audio;
pub mod catalog;
pub mod client;
pub mod http;
pub mod model;
pub mod options;
pub mod providers;
pub mod sse;
pub mod stream;

// Re-exports for convenience
pub use audio::AudioClip;
pub use catalog::Catalog;
pub use client::{Brain, ClientError, DeltaStream, StreamingBrain};
pub use model::{GeneratedImage, ImagePrompt, SpeechAudio};
