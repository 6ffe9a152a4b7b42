//! OpenAI legacy Completions brain (instruct models).

use async_trait::async_trait;
use itertools::Itertools;
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::client::{Brain, ClientError};
use crate::http::post_json;
use crate::model::Usage;
use crate::options::{CompletionOptions, HttpTransport, TransportOptions};

const COMPLETIONS_PATH: &str = "/v1/completions";

/// Prompt-in, text-out brain for the `/v1/completions` endpoint.
pub struct CompletionBrain {
    options: CompletionOptions,
    transport_options: TransportOptions<HttpTransport>,
}

#[async_trait]
impl Brain for CompletionBrain {
    type Options = CompletionOptions;
    type Input = str;
    type Output = String;

    async fn request(
        message: &str,
        options: &CompletionOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<String, ClientError> {
        let request_body = CompletionRequest::build(message, options)?;
        debug!("Completion with model {}", request_body.model);

        let response: CompletionResponse =
            post_json(transport_options, COMPLETIONS_PATH, &request_body).await?;
        if let Some(usage) = &response.usage {
            info!(
                "Tokens used: prompt {}, completion {}, total {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        Ok(response.choices.head.text.trim().to_string())
    }

    fn new(options: CompletionOptions, transport_options: TransportOptions<HttpTransport>) -> Self {
        Self {
            options,
            transport_options,
        }
    }

    fn options(&self) -> &CompletionOptions {
        &self.options
    }

    fn transport_options(&self) -> &TransportOptions<HttpTransport> {
        &self.transport_options
    }
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: &'static str,
    prompt: String,
    max_tokens: u32,
    temperature: f32,
}

impl CompletionRequest {
    fn build(message: &str, options: &CompletionOptions) -> Result<Self, ClientError> {
        if message.is_empty() {
            return Err(ClientError::precondition("completion message is empty"));
        }

        Ok(Self {
            model: options.model.wire_str(),
            prompt: [options.system_prompt.as_str(), message].iter().join("\n\n"),
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: NonEmpty<CompletionChoice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_joins_system_prompt_and_message() {
        let options = CompletionOptions::default().with_system_prompt("Answer in French.");
        let request = CompletionRequest::build("Hello", &options).unwrap();
        assert_eq!(request.prompt, "Answer in French.\n\nHello");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "model": "gpt-3.5-turbo-instruct",
                "prompt": "Answer in French.\n\nHello",
                "max_tokens": 2048,
                "temperature": 0.5
            })
        );
    }

    #[test]
    fn test_empty_message_is_rejected() {
        let result = CompletionRequest::build("", &CompletionOptions::default());
        assert!(matches!(result, Err(ClientError::Precondition(_))));
    }

    #[test]
    fn test_response_text() {
        let body = r#"{"id":"cmpl-1","choices":[{"text":"\n\nBonjour ","index":0}],"usage":{"prompt_tokens":5,"completion_tokens":2,"total_tokens":7}}"#;
        let response: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.choices.head.text.trim(), "Bonjour");
        assert_eq!(response.usage.unwrap().completion_tokens, 2);
    }
}
