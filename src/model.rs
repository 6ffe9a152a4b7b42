//! Data models shared by several brains.

use bytes::Bytes;
use nonempty::NonEmpty;
use serde::{Deserialize, Serialize};

use crate::catalog::TtsResponseFormat;

/// Role of the message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged text message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Token usage information.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// An image produced by the image brain.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Where the image was served from
    pub url: String,
    /// The prompt after server-side rewriting, when the model reports it
    pub revised_prompt: Option<String>,
    /// Downloaded image file (PNG for the hosted models)
    pub bytes: Bytes,
}

/// Synthesized speech returned by the text-to-speech brain.
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    pub format: TtsResponseFormat,
    pub data: Bytes,
}

impl SpeechAudio {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Input for the vision brain: a JPEG-encoded image and a question about it.
#[derive(Debug, Clone, Default)]
pub struct ImagePrompt {
    pub jpeg: Vec<u8>,
    pub prompt: String,
}

impl ImagePrompt {
    pub fn new(jpeg: impl Into<Vec<u8>>, prompt: impl Into<String>) -> Self {
        Self {
            jpeg: jpeg.into(),
            prompt: prompt.into(),
        }
    }
}

// --- Chat Completions response (shared by chat and vision) ---

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: NonEmpty<ChatChoice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Content of the first choice. A `null` content (refusals, tool calls)
    /// reads as an empty reply.
    pub fn into_first_content(self) -> String {
        self.choices.head.message.content.unwrap_or_default()
    }
}
