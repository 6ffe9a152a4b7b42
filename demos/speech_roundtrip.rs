//! Synthesize speech as raw PCM, then upload it as WAV for transcription.
//!
//! Run with:
//! ```bash
//! export OPENAI_API_KEY="your-api-key"
//! cargo run --example speech_roundtrip
//! ```

use ai_toolkit::audio::AudioClip;
use ai_toolkit::catalog::{TtsResponseFormat, TtsVoice};
use ai_toolkit::client::Brain;
use ai_toolkit::options::{HttpTransport, SpeechToTextOptions, TextToSpeechOptions, TransportOptions};
use ai_toolkit::providers::{SpeechToTextBrain, TextToSpeechBrain};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let transport_options = TransportOptions::new(HttpTransport::from_env()?);

    // 24 kHz mono 16-bit PCM, no header
    let tts = TextToSpeechBrain::new(
        TextToSpeechOptions::default()
            .with_voice(TtsVoice::Nova)
            .with_response_format(TtsResponseFormat::Pcm),
        transport_options.clone(),
    );
    let speech = tts.send("The quick brown fox jumps over the lazy dog.").await?;
    println!("Received {} bytes of {}", speech.data.len(), speech.mime_type());

    let samples: Vec<f32> = speech
        .data
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]) as f32 / i16::MAX as f32)
        .collect();
    let clip = AudioClip::new(samples, 1, 24_000);
    println!("Clip: {} frames at {} Hz", clip.frames(), clip.sample_rate());

    let stt = SpeechToTextBrain::new(SpeechToTextOptions::default(), transport_options);
    let transcript = stt.send(&clip).await?;
    println!("\n=== Transcript ===\n{}", transcript);

    Ok(())
}
