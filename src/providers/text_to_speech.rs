//! OpenAI speech synthesis brain.

use async_trait::async_trait;
use serde::Serialize;
use tracing::debug;

use crate::catalog::{Catalog, TtsModel};
use crate::client::{Brain, ClientError};
use crate::http::send_json;
use crate::model::SpeechAudio;
use crate::options::{HttpTransport, TextToSpeechOptions, TransportOptions};

const SPEECH_PATH: &str = "/v1/audio/speech";

pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;

/// Text in, encoded audio bytes out.
pub struct TextToSpeechBrain {
    options: TextToSpeechOptions,
    transport_options: TransportOptions<HttpTransport>,
}

#[async_trait]
impl Brain for TextToSpeechBrain {
    type Options = TextToSpeechOptions;
    type Input = str;
    type Output = SpeechAudio;

    async fn request(
        text: &str,
        options: &TextToSpeechOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<SpeechAudio, ClientError> {
        let request_body = SpeechRequest::build(text, options)?;
        debug!(
            "Speech with model {} voice {} as {}",
            request_body.model, request_body.voice, request_body.response_format
        );

        let response = send_json(transport_options, SPEECH_PATH, &request_body).await?;
        let data = response.bytes().await?;
        debug!("Received {} audio bytes", data.len());

        Ok(SpeechAudio {
            format: options.response_format,
            data,
        })
    }

    fn new(options: TextToSpeechOptions, transport_options: TransportOptions<HttpTransport>) -> Self {
        Self {
            options,
            transport_options,
        }
    }

    fn options(&self) -> &TextToSpeechOptions {
        &self.options
    }

    fn transport_options(&self) -> &TransportOptions<HttpTransport> {
        &self.transport_options
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    model: &'static str,
    input: &'a str,
    voice: &'static str,
    speed: f32,
    response_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<&'a str>,
}

impl<'a> SpeechRequest<'a> {
    fn build(text: &'a str, options: &'a TextToSpeechOptions) -> Result<Self, ClientError> {
        if text.is_empty() {
            return Err(ClientError::precondition("speech text is empty"));
        }

        Ok(Self {
            model: options.model.wire_str(),
            input: text,
            voice: options.voice.wire_str(),
            speed: clamp_speed(options.speed),
            response_format: options.response_format.wire_str(),
            instructions: instructions_for(options.model, &options.instructions),
        })
    }
}

// Non-finite speeds fall back to normal speed.
fn clamp_speed(speed: f32) -> f32 {
    if speed.is_finite() {
        speed.clamp(MIN_SPEED, MAX_SPEED)
    } else {
        1.0
    }
}

// Only instruction-capable models receive the field, even when it is empty.
fn instructions_for(model: TtsModel, instructions: &str) -> Option<&str> {
    model.supports_instructions().then_some(instructions)
}
