//! OpenAI capability brains.

pub mod assistant;
pub mod chat;
pub mod completion;
pub mod image;
pub mod speech_to_text;
pub mod text_to_speech;
pub mod vision;

// Re-export for convenience
pub use assistant::AssistantBrain;
pub use chat::ChatBrain;
pub use completion::CompletionBrain;
pub use image::ImageBrain;
pub use speech_to_text::SpeechToTextBrain;
pub use text_to_speech::TextToSpeechBrain;
pub use vision::VisionBrain;
