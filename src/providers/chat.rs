//! OpenAI Chat Completions brain.
//!
//! See: <https://platform.openai.com/docs/api-reference/chat>

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::client::{Brain, ClientError};
use crate::http::post_json;
use crate::model::{ChatCompletionResponse, ChatMessage};
use crate::options::{ChatOptions, HttpTransport, TransportOptions};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Single-turn chat brain: an optional system prompt plus one user message.
pub struct ChatBrain {
    options: ChatOptions,
    transport_options: TransportOptions<HttpTransport>,
}

#[async_trait]
impl Brain for ChatBrain {
    type Options = ChatOptions;
    type Input = str;
    type Output = String;

    async fn request(
        message: &str,
        options: &ChatOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<String, ClientError> {
        let request_body = ChatRequest::build(message, options)?;
        debug!("Chat completion with model {}", request_body.model);

        let response: ChatCompletionResponse =
            post_json(transport_options, CHAT_COMPLETIONS_PATH, &request_body).await?;
        if let Some(usage) = &response.usage {
            info!(
                "Tokens used: prompt {}, completion {}, total {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        Ok(response.into_first_content())
    }

    fn new(options: ChatOptions, transport_options: TransportOptions<HttpTransport>) -> Self {
        Self {
            options,
            transport_options,
        }
    }

    fn options(&self) -> &ChatOptions {
        &self.options
    }

    fn transport_options(&self) -> &TransportOptions<HttpTransport> {
        &self.transport_options
    }
}

// --- Request Types ---

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

impl ChatRequest {
    fn build(message: &str, options: &ChatOptions) -> Result<Self, ClientError> {
        if message.is_empty() {
            return Err(ClientError::precondition("chat message is empty"));
        }

        let mut messages = Vec::with_capacity(2);
        if !options.system_prompt.is_empty() {
            messages.push(ChatMessage::system(options.system_prompt.as_str()));
        }
        messages.push(ChatMessage::user(message));

        Ok(Self {
            model: options.model.wire_str(),
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        })
    }
}
