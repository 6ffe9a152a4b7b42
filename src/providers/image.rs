//! OpenAI image generation brain.
//!
//! Images are requested with `response_format = "url"` and then downloaded
//! with a second, unauthenticated request.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::client::{Brain, ClientError};
use crate::http::{download, post_json};
use crate::model::GeneratedImage;
use crate::options::{HttpTransport, ImageOptions, TransportOptions};

const IMAGE_GENERATIONS_PATH: &str = "/v1/images/generations";

pub struct ImageBrain {
    options: ImageOptions,
    transport_options: TransportOptions<HttpTransport>,
}

impl ImageBrain {
    /// Generate an image and return only its hosted URL, skipping the download.
    pub async fn generate_url(&self, prompt: &str) -> Result<String, ClientError> {
        let data = request_image(prompt, &self.options, &self.transport_options).await?;
        Ok(data.url)
    }
}

#[async_trait]
impl Brain for ImageBrain {
    type Options = ImageOptions;
    type Input = str;
    type Output = GeneratedImage;

    async fn request(
        prompt: &str,
        options: &ImageOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<GeneratedImage, ClientError> {
        let data = request_image(prompt, options, transport_options).await?;
        let bytes = download(transport_options, &data.url).await?;
        debug!("Downloaded {} image bytes", bytes.len());

        Ok(GeneratedImage {
            url: data.url,
            revised_prompt: data.revised_prompt,
            bytes,
        })
    }

    fn new(options: ImageOptions, transport_options: TransportOptions<HttpTransport>) -> Self {
        Self {
            options,
            transport_options,
        }
    }

    fn options(&self) -> &ImageOptions {
        &self.options
    }

    fn transport_options(&self) -> &TransportOptions<HttpTransport> {
        &self.transport_options
    }
}

async fn request_image(
    prompt: &str,
    options: &ImageOptions,
    transport_options: &TransportOptions<HttpTransport>,
) -> Result<ImageData, ClientError> {
    let request_body = ImageGenerationRequest::build(prompt, options)?;
    debug!(
        "Image generation with model {} at {}",
        request_body.model, request_body.size
    );

    let response: ImageGenerationResponse =
        post_json(transport_options, IMAGE_GENERATIONS_PATH, &request_body).await?;
    response
        .data
        .into_iter()
        .find(|image| image.url.as_deref().is_some_and(|url| !url.is_empty()))
        .ok_or_else(|| ClientError::Protocol("No image URL received".to_string()))
        .map(|image| ImageData {
            url: image.url.unwrap_or_default(),
            revised_prompt: image.revised_prompt,
        })
}

struct ImageData {
    url: String,
    revised_prompt: Option<String>,
}

// --- Request/Response Types ---

#[derive(Debug, Serialize)]
struct ImageGenerationRequest<'a> {
    prompt: &'a str,
    model: &'static str,
    n: u32,
    quality: &'static str,
    response_format: &'static str,
    size: &'static str,
    style: &'static str,
}

impl<'a> ImageGenerationRequest<'a> {
    fn build(prompt: &'a str, options: &ImageOptions) -> Result<Self, ClientError> {
        if prompt.is_empty() {
            return Err(ClientError::precondition("image prompt is empty"));
        }

        Ok(Self {
            prompt,
            model: options.model.wire_str(),
            n: 1,
            quality: options.quality.wire_str(),
            response_format: "url",
            size: options.size.wire_str(),
            style: options.style.wire_str(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageResponseData>,
}

#[derive(Debug, Deserialize)]
struct ImageResponseData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}
