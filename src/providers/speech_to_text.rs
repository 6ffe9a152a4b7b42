//! OpenAI audio transcription brain.

use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use crate::audio::{encode_wav, AudioClip};
use crate::catalog::Catalog;
use crate::client::{Brain, ClientError};
use crate::http::{authorized_post, ensure_success};
use crate::options::{HttpTransport, SpeechToTextOptions, TransportOptions};

const TRANSCRIPTIONS_PATH: &str = "/v1/audio/transcriptions";

/// Uploads a clip as 16-bit PCM WAV and returns the transcript.
pub struct SpeechToTextBrain {
    options: SpeechToTextOptions,
    transport_options: TransportOptions<HttpTransport>,
}

#[async_trait]
impl Brain for SpeechToTextBrain {
    type Options = SpeechToTextOptions;
    type Input = AudioClip;
    type Output = String;

    async fn request(
        clip: &AudioClip,
        options: &SpeechToTextOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<String, ClientError> {
        let form = build_form(clip, options)?;
        debug!(
            "Transcribing {} frames at {} Hz with {}",
            clip.frames(),
            clip.sample_rate(),
            options.model.wire_str()
        );

        let response = authorized_post(transport_options, TRANSCRIPTIONS_PATH)?
            .multipart(form)
            .send()
            .await?;
        let text = ensure_success(response).await?.text().await?;
        let transcription: TranscriptionResponse = serde_json::from_str(&text)?;
        Ok(transcription.text)
    }

    fn new(options: SpeechToTextOptions, transport_options: TransportOptions<HttpTransport>) -> Self {
        Self {
            options,
            transport_options,
        }
    }

    fn options(&self) -> &SpeechToTextOptions {
        &self.options
    }

    fn transport_options(&self) -> &TransportOptions<HttpTransport> {
        &self.transport_options
    }
}

fn build_form(clip: &AudioClip, options: &SpeechToTextOptions) -> Result<Form, ClientError> {
    if clip.is_empty() {
        return Err(ClientError::precondition("audio clip has no samples"));
    }

    let file = Part::bytes(encode_wav(clip)?)
        .file_name(upload_file_name())
        .mime_str("audio/wav")
        .map_err(|e| ClientError::Config(format!("Invalid upload mime type: {}", e)))?;

    Ok(Form::new()
        .text("model", options.model.wire_str())
        .part("file", file))
}

fn upload_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or_default();
    format!("audio_{}.wav", millis)
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}
