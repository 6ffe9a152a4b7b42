//! Model catalogs: static mappings from model, voice, size, quality and
//! format selections to the strings the API expects.
//!
//! Every catalog is total. Lookups by position or by wire name that fall
//! outside the catalog resolve to the catalog's fallback instead of failing,
//! so a stale configuration value still produces a usable request.
//!
//! ```
//! use ai_toolkit::catalog::{Catalog, ChatModel};
//!
//! assert_eq!(ChatModel::Gpt4oMini.wire_str(), "gpt-4o-mini");
//! assert_eq!(ChatModel::resolve_index(99), "gpt-3.5-turbo");
//! assert_eq!(ChatModel::resolve_wire("gpt-5-ultra"), "gpt-3.5-turbo");
//! ```

use serde::{Deserialize, Serialize};

/// Shown by catalogs that carry no pricing data.
pub const PRICE_UNAVAILABLE: &str = "Price not available";

/// A closed enumeration with a total mapping to wire strings.
pub trait Catalog: Sized + Copy + 'static {
    /// Every entry, in declaration order.
    const ALL: &'static [Self];

    /// Wire string used when a lookup falls outside the catalog.
    const FALLBACK: &'static str;

    fn wire_str(self) -> &'static str;

    /// Human-readable pricing summary.
    fn price_info(self) -> &'static str {
        PRICE_UNAVAILABLE
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn from_wire(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|entry| entry.wire_str() == name)
    }

    fn resolve_index(index: usize) -> &'static str {
        Self::from_index(index).map_or(Self::FALLBACK, Self::wire_str)
    }

    fn resolve_wire(name: &str) -> &'static str {
        Self::from_wire(name).map_or(Self::FALLBACK, Self::wire_str)
    }

    fn price_info_index(index: usize) -> &'static str {
        Self::from_index(index).map_or(PRICE_UNAVAILABLE, Self::price_info)
    }
}

/// Chat completion models, oldest and smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChatModel {
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
    #[serde(rename = "gpt-4.1-nano")]
    Gpt41Nano,
    #[serde(rename = "gpt-4.1-mini")]
    Gpt41Mini,
    #[serde(rename = "gpt-4.1")]
    Gpt41,
    #[default]
    #[serde(rename = "gpt-4o-mini")]
    Gpt4oMini,
    #[serde(rename = "gpt-4o")]
    Gpt4o,
}

impl Catalog for ChatModel {
    const ALL: &'static [Self] = &[
        Self::Gpt35Turbo,
        Self::Gpt4,
        Self::Gpt4Turbo,
        Self::Gpt41Nano,
        Self::Gpt41Mini,
        Self::Gpt41,
        Self::Gpt4oMini,
        Self::Gpt4o,
    ];
    const FALLBACK: &'static str = "gpt-3.5-turbo";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::Gpt4 => "gpt-4",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt41Nano => "gpt-4.1-nano",
            Self::Gpt41Mini => "gpt-4.1-mini",
            Self::Gpt41 => "gpt-4.1",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt4o => "gpt-4o",
        }
    }

    fn price_info(self) -> &'static str {
        match self {
            Self::Gpt35Turbo => "Input: $0.50 / 1M tokens | Output: $1.50 / 1M tokens",
            Self::Gpt4 => "Input: $30.00 / 1M tokens | Output: $60.00 / 1M tokens",
            Self::Gpt4Turbo => "Input: $10.00 / 1M tokens | Output: $30.00 / 1M tokens",
            Self::Gpt41Nano => "Input: $0.10 / 1M tokens | Output: $0.40 / 1M tokens",
            Self::Gpt41Mini => "Input: $0.40 / 1M tokens | Output: $1.60 / 1M tokens",
            Self::Gpt41 => "Input: $2.00 / 1M tokens | Output: $8.00 / 1M tokens",
            Self::Gpt4oMini => "Input: $0.15 / 1M tokens | Output: $0.60 / 1M tokens",
            Self::Gpt4o => "Input: $2.50 / 1M tokens | Output: $10.00 / 1M tokens",
        }
    }
}

/// Instruct models served by the legacy completions endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CompletionModel {
    #[serde(rename = "gpt-3.5-turbo-instruct-0914")]
    Gpt35TurboInstruct0914,
    #[default]
    #[serde(rename = "gpt-3.5-turbo-instruct")]
    Gpt35TurboInstruct,
}

impl Catalog for CompletionModel {
    const ALL: &'static [Self] = &[Self::Gpt35TurboInstruct0914, Self::Gpt35TurboInstruct];
    const FALLBACK: &'static str = "gpt-3.5-turbo-instruct";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Gpt35TurboInstruct0914 => "gpt-3.5-turbo-instruct-0914",
            Self::Gpt35TurboInstruct => "gpt-3.5-turbo-instruct",
        }
    }

    fn price_info(self) -> &'static str {
        match self {
            Self::Gpt35TurboInstruct0914 | Self::Gpt35TurboInstruct => {
                "Input: $1.50 / 1M tokens | Output: $2.00 / 1M tokens"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageModel {
    #[default]
    #[serde(rename = "dall-e-3")]
    DallE3,
    #[serde(rename = "dall-e-2")]
    DallE2,
    #[serde(rename = "gpt-image-1")]
    GptImage1,
}

impl Catalog for ImageModel {
    const ALL: &'static [Self] = &[Self::DallE3, Self::DallE2, Self::GptImage1];
    const FALLBACK: &'static str = "dall-e-3";

    fn wire_str(self) -> &'static str {
        match self {
            Self::DallE3 => "dall-e-3",
            Self::DallE2 => "dall-e-2",
            Self::GptImage1 => "gpt-image-1",
        }
    }

    fn price_info(self) -> &'static str {
        match self {
            Self::GptImage1 => "Input: $10.00 / 1M tokens | Output: $40.00 / 1M tokens",
            Self::DallE3 | Self::DallE2 => "Pricing varies by size and quality. See OpenAI docs.",
        }
    }
}

/// Output resolution. Not every model accepts every size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[default]
    #[serde(rename = "1024x1024")]
    S1024x1024,
    #[serde(rename = "1792x1024")]
    S1792x1024,
    #[serde(rename = "1024x1792")]
    S1024x1792,
    #[serde(rename = "512x512")]
    S512x512,
    #[serde(rename = "256x256")]
    S256x256,
}

impl ImageSize {
    /// Whether the size is accepted by the given model.
    pub fn supported_by(self, model: ImageModel) -> bool {
        match self {
            Self::S1024x1024 => true,
            Self::S1792x1024 | Self::S1024x1792 => model == ImageModel::DallE3,
            Self::S512x512 | Self::S256x256 => model == ImageModel::DallE2,
        }
    }
}

impl Catalog for ImageSize {
    const ALL: &'static [Self] = &[
        Self::S1024x1024,
        Self::S1792x1024,
        Self::S1024x1792,
        Self::S512x512,
        Self::S256x256,
    ];
    const FALLBACK: &'static str = "1024x1024";

    fn wire_str(self) -> &'static str {
        match self {
            Self::S1024x1024 => "1024x1024",
            Self::S1792x1024 => "1792x1024",
            Self::S1024x1792 => "1024x1792",
            Self::S512x512 => "512x512",
            Self::S256x256 => "256x256",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    #[default]
    Standard,
    Hd,
}

impl Catalog for ImageQuality {
    const ALL: &'static [Self] = &[Self::Standard, Self::Hd];
    const FALLBACK: &'static str = "standard";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Hd => "hd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Vivid,
    Natural,
}

impl Catalog for ImageStyle {
    const ALL: &'static [Self] = &[Self::Vivid, Self::Natural];
    const FALLBACK: &'static str = "vivid";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Vivid => "vivid",
            Self::Natural => "natural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TranscriptionModel {
    #[serde(rename = "gpt-4o-transcribe")]
    Gpt4oTranscribe,
    #[serde(rename = "gpt-4o-mini-transcribe")]
    Gpt4oMiniTranscribe,
    #[default]
    #[serde(rename = "whisper-1")]
    Whisper1,
}

impl Catalog for TranscriptionModel {
    const ALL: &'static [Self] = &[Self::Gpt4oTranscribe, Self::Gpt4oMiniTranscribe, Self::Whisper1];
    const FALLBACK: &'static str = "whisper-1";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Gpt4oTranscribe => "gpt-4o-transcribe",
            Self::Gpt4oMiniTranscribe => "gpt-4o-mini-transcribe",
            Self::Whisper1 => "whisper-1",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TtsModel {
    #[default]
    #[serde(rename = "tts-1")]
    Tts1,
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
    #[serde(rename = "gpt-4o-mini-tts")]
    Gpt4oMiniTts,
}

impl TtsModel {
    /// `tts-1` and `tts-1-hd` reject the `instructions` field.
    pub fn supports_instructions(self) -> bool {
        !matches!(self, Self::Tts1 | Self::Tts1Hd)
    }
}

impl Catalog for TtsModel {
    const ALL: &'static [Self] = &[Self::Tts1, Self::Tts1Hd, Self::Gpt4oMiniTts];
    const FALLBACK: &'static str = "tts-1";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Tts1 => "tts-1",
            Self::Tts1Hd => "tts-1-hd",
            Self::Gpt4oMiniTts => "gpt-4o-mini-tts",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsVoice {
    #[default]
    Alloy,
    Ash,
    Coral,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Catalog for TtsVoice {
    const ALL: &'static [Self] = &[
        Self::Alloy,
        Self::Ash,
        Self::Coral,
        Self::Echo,
        Self::Fable,
        Self::Onyx,
        Self::Nova,
        Self::Shimmer,
    ];
    const FALLBACK: &'static str = "alloy";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Ash => "ash",
            Self::Coral => "coral",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Shimmer => "shimmer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TtsResponseFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
    Pcm,
}

impl TtsResponseFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
            Self::Wav => "audio/wav",
            // raw 24kHz 16-bit little-endian samples, no container
            Self::Pcm => "audio/pcm",
        }
    }
}

impl Catalog for TtsResponseFormat {
    const ALL: &'static [Self] = &[
        Self::Mp3,
        Self::Opus,
        Self::Aac,
        Self::Flac,
        Self::Wav,
        Self::Pcm,
    ];
    const FALLBACK: &'static str = "mp3";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Aac => "aac",
            Self::Flac => "flac",
            Self::Wav => "wav",
            Self::Pcm => "pcm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisionModel {
    #[default]
    #[serde(rename = "gpt-4o")]
    Gpt4o,
    #[serde(rename = "gpt-4-turbo")]
    Gpt4Turbo,
}

impl Catalog for VisionModel {
    const ALL: &'static [Self] = &[Self::Gpt4o, Self::Gpt4Turbo];
    const FALLBACK: &'static str = "gpt-4o";

    fn wire_str(self) -> &'static str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4Turbo => "gpt-4-turbo",
        }
    }
}
