//! PCM audio clips and the WAV encoding used for transcription uploads.

use bytes::{BufMut, BytesMut};

use crate::client::ClientError;

const RIFF_HEADER_LEN: usize = 44;
const FMT_CHUNK_LEN: u32 = 16;
const PCM_FORMAT_TAG: u16 = 1;
const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;

/// Interleaved floating point samples in `[-1.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioClip {
    /// Create a clip from interleaved samples.
    ///
    /// A channel count of zero is treated as mono.
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels: channels.max(1),
            sample_rate,
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples per channel.
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.channels)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Encode as a canonical 16-bit PCM WAV file.
    pub fn to_wav(&self) -> Result<Vec<u8>, ClientError> {
        encode_wav(self)
    }
}

/// Encode a clip as RIFF/WAVE with a single `fmt ` and `data` chunk.
///
/// Size fields are written as placeholders and patched once the sample data
/// is in place. Fails with [`ClientError::Precondition`] when the channel
/// count, byte rate or data size cannot be represented in the header.
pub fn encode_wav(clip: &AudioClip) -> Result<Vec<u8>, ClientError> {
    let channels = clip.channels;
    let sample_rate = clip.sample_rate;
    let block_align = channels
        .checked_mul(BYTES_PER_SAMPLE)
        .ok_or_else(|| ClientError::precondition(format!("too many channels: {}", channels)))?;
    let byte_rate = sample_rate
        .checked_mul(u32::from(block_align))
        .ok_or_else(|| ClientError::precondition(format!("sample rate too high: {}", sample_rate)))?;
    let data_len = clip
        .samples
        .len()
        .checked_mul(usize::from(BYTES_PER_SAMPLE))
        .and_then(|len| u32::try_from(len).ok())
        .filter(|len| len.checked_add(RIFF_HEADER_LEN as u32).is_some())
        .ok_or_else(|| ClientError::precondition("audio clip too large for a WAV file"))?;

    let mut buf = BytesMut::with_capacity(RIFF_HEADER_LEN + data_len as usize);
    buf.put_slice(b"RIFF");
    buf.put_u32_le(0);
    buf.put_slice(b"WAVE");

    buf.put_slice(b"fmt ");
    buf.put_u32_le(FMT_CHUNK_LEN);
    buf.put_u16_le(PCM_FORMAT_TAG);
    buf.put_u16_le(channels);
    buf.put_u32_le(sample_rate);
    buf.put_u32_le(byte_rate);
    buf.put_u16_le(block_align);
    buf.put_u16_le(BITS_PER_SAMPLE);

    buf.put_slice(b"data");
    buf.put_u32_le(0);

    for sample in &clip.samples {
        // float to int casts saturate
        buf.put_i16_le((sample * f32::from(i16::MAX)) as i16);
    }

    let riff_len = data_len + (RIFF_HEADER_LEN as u32 - 8);
    buf[4..8].copy_from_slice(&riff_len.to_le_bytes());
    buf[40..44].copy_from_slice(&data_len.to_le_bytes());

    Ok(buf.to_vec())
}
