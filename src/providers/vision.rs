//! OpenAI vision brain: one JPEG plus a text prompt through Chat Completions.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::client::{Brain, ClientError};
use crate::http::post_json;
use crate::model::{ChatCompletionResponse, ImagePrompt, Role};
use crate::options::{HttpTransport, TransportOptions, VisionOptions};

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

pub struct VisionBrain {
    options: VisionOptions,
    transport_options: TransportOptions<HttpTransport>,
}

#[async_trait]
impl Brain for VisionBrain {
    type Options = VisionOptions;
    type Input = ImagePrompt;
    type Output = String;

    async fn request(
        input: &ImagePrompt,
        options: &VisionOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<String, ClientError> {
        let request_body = VisionRequest::build(input, options)?;
        debug!(
            "Vision with model {} ({} image bytes)",
            request_body.model,
            input.jpeg.len()
        );

        let response: ChatCompletionResponse =
            post_json(transport_options, CHAT_COMPLETIONS_PATH, &request_body).await?;
        Ok(response.into_first_content())
    }

    fn new(options: VisionOptions, transport_options: TransportOptions<HttpTransport>) -> Self {
        Self {
            options,
            transport_options,
        }
    }

    fn options(&self) -> &VisionOptions {
        &self.options
    }

    fn transport_options(&self) -> &TransportOptions<HttpTransport> {
        &self.transport_options
    }
}

/// Encode JPEG bytes as a `data:` URI.
pub fn jpeg_data_uri(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg))
}

// --- Request Types ---

#[derive(Debug, Serialize)]
struct VisionRequest<'a> {
    model: &'static str,
    messages: Vec<VisionMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct VisionMessage<'a> {
    role: Role,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

impl<'a> VisionRequest<'a> {
    fn build(input: &'a ImagePrompt, options: &VisionOptions) -> Result<Self, ClientError> {
        if input.jpeg.is_empty() {
            return Err(ClientError::precondition("vision image is empty"));
        }

        let content = vec![
            ContentPart::Text {
                text: input.prompt.as_str(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: jpeg_data_uri(&input.jpeg),
                },
            },
        ];

        Ok(Self {
            model: options.model.wire_str(),
            messages: vec![VisionMessage {
                role: Role::User,
                content,
            }],
            max_tokens: options.max_tokens,
        })
    }
}
