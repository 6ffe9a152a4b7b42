//! Option structures for brain and transport configuration.
//!
//! Every capability has its own options struct whose defaults match the
//! toolkit's out-of-the-box brain assets. Options derive serde so they can be
//! loaded from a configuration file; missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::catalog::{
    ChatModel, CompletionModel, ImageModel, ImageQuality, ImageSize, ImageStyle,
    TranscriptionModel, TtsModel, TtsResponseFormat, TtsVoice, VisionModel,
};
use crate::client::ClientError;

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the API base URL.
pub const BASE_URL_ENV: &str = "OPENAI_BASE_URL";

/// A secret string type for sensitive data like API keys.
/// Prevents accidental logging or display of secrets.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    /// Create a new secret string.
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the underlying secret value.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretString([REDACTED])")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s.to_string())
    }
}

/// Generic transport options containing truly generic transport fields
/// and provider-specific transport configuration.
///
/// # Example
/// ```rust
/// use ai_toolkit::options::{TransportOptions, HttpTransport, SecretString};
/// use std::time::Duration;
///
/// let options = TransportOptions {
///     timeout: Some(Duration::from_secs(30)),
///     provider: HttpTransport {
///         api_key: Some(SecretString::new("sk-...".to_string())),
///         base_url: Some("https://api.openai.com".to_string()),
///         proxy: None,
///         extra_headers: None,
///     },
/// };
/// ```
#[derive(Debug, Clone)]
pub struct TransportOptions<T> {
    /// Request timeout. `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,

    /// Provider-specific transport options
    pub provider: T,
}

impl<T> TransportOptions<T> {
    /// Create new transport options with provider-specific configuration.
    pub fn new(provider: T) -> Self {
        Self {
            timeout: None,
            provider,
        }
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// HTTP-specific transport options.
/// Used as the provider field in `TransportOptions<HttpTransport>`.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    /// API key sent as a bearer credential on every request
    pub api_key: Option<SecretString>,

    /// Base URL for API endpoints (defaults to `https://api.openai.com`)
    pub base_url: Option<String>,

    /// HTTP proxy URL
    pub proxy: Option<String>,

    /// Additional HTTP headers to include in requests
    pub extra_headers: Option<HashMap<String, String>>,
}

impl HttpTransport {
    /// Create new HTTP transport options with an API key.
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            base_url: None,
            proxy: None,
            extra_headers: None,
        }
    }

    /// Read the API key from `OPENAI_API_KEY` and an optional base URL from
    /// `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self, ClientError> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|e| ClientError::Config(format!("{}: {}", API_KEY_ENV, e)))?;
        let mut transport = Self::new(api_key);
        transport.base_url = std::env::var(BASE_URL_ENV).ok().filter(|url| !url.is_empty());
        Ok(transport)
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Set the proxy URL.
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Set extra headers.
    pub fn with_extra_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.extra_headers = Some(headers);
        self
    }

    /// Add a single extra header.
    pub fn with_header(mut self, key: String, value: String) -> Self {
        self.extra_headers
            .get_or_insert_with(HashMap::new)
            .insert(key, value);
        self
    }
}

/// Chat completion settings.
///
/// # Example
/// ```rust
/// use ai_toolkit::catalog::ChatModel;
/// use ai_toolkit::options::ChatOptions;
///
/// let options = ChatOptions::default()
///     .with_model(ChatModel::Gpt4o)
///     .with_temperature(0.2);
/// assert_eq!(options.max_tokens, 2048);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatOptions {
    pub model: ChatModel,

    pub max_tokens: u32,

    /// Sampling temperature (0.0 deterministic, 2.0 very creative)
    pub temperature: f32,

    /// Sent as a leading system message when non-empty
    pub system_prompt: String,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            model: ChatModel::Gpt4oMini,
            max_tokens: 2048,
            temperature: 1.0,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl ChatOptions {
    pub fn with_model(mut self, model: ChatModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

/// Legacy text completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompletionOptions {
    pub model: CompletionModel,
    pub max_tokens: u32,
    pub temperature: f32,

    /// Prepended to every message, separated by a blank line
    pub system_prompt: String,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: CompletionModel::Gpt35TurboInstruct,
            max_tokens: 2048,
            temperature: 0.5,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl CompletionOptions {
    pub fn with_model(mut self, model: CompletionModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }
}

/// Image generation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    pub model: ImageModel,
    pub size: ImageSize,
    pub quality: ImageQuality,
    pub style: ImageStyle,
}

impl ImageOptions {
    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechToTextOptions {
    pub model: TranscriptionModel,
}

impl SpeechToTextOptions {
    pub fn with_model(mut self, model: TranscriptionModel) -> Self {
        self.model = model;
        self
    }
}

/// Text-to-speech settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TextToSpeechOptions {
    pub model: TtsModel,
    pub voice: TtsVoice,

    /// Playback speed, clamped to `0.25..=4.0` when the request is built
    pub speed: f32,

    pub response_format: TtsResponseFormat,

    /// Voice style instructions. Ignored by `tts-1` and `tts-1-hd`.
    pub instructions: String,
}

impl Default for TextToSpeechOptions {
    fn default() -> Self {
        Self {
            model: TtsModel::Tts1,
            voice: TtsVoice::Alloy,
            speed: 1.0,
            response_format: TtsResponseFormat::Mp3,
            instructions: String::new(),
        }
    }
}

impl TextToSpeechOptions {
    pub fn with_model(mut self, model: TtsModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_voice(mut self, voice: TtsVoice) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_response_format(mut self, response_format: TtsResponseFormat) -> Self {
        self.response_format = response_format;
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionOptions {
    pub model: VisionModel,
    pub max_tokens: u32,
}

impl Default for VisionOptions {
    fn default() -> Self {
        Self {
            model: VisionModel::Gpt4o,
            max_tokens: 1024,
        }
    }
}

impl VisionOptions {
    pub fn with_model(mut self, model: VisionModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Assistants API settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantOptions {
    /// Identifier of a server-side assistant (`asst_...`)
    pub assistant_id: String,

    /// When set, a failure to append the user message is logged and the run
    /// is started anyway. Off by default: the run would not see the message.
    pub continue_on_message_error: bool,
}

impl AssistantOptions {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            assistant_id: assistant_id.into(),
            continue_on_message_error: false,
        }
    }

    pub fn with_continue_on_message_error(mut self, enabled: bool) -> Self {
        self.continue_on_message_error = enabled;
        self
    }
}
