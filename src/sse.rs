//! Server-Sent Events (SSE) stream processing utilities.
//!
//! This module provides incremental SSE decoding that does not depend on how
//! the network splits the body into chunks: partial lines and partial UTF-8
//! code points are carried over to the next chunk.
//!
//! SSE format:
//! ```text
//! event: thread.message.delta
//! data: {"key": "value"}
//!
//! data: {"another": "event"}
//!
//! data: [DONE]
//! ```

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};

use crate::client::ClientError;

/// A decoded SSE line of interest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseFrame {
    /// Payload of a `data:` line, trimmed.
    Data(String),
    /// The `[DONE]` sentinel. Nothing is decoded after it.
    Done,
}

/// Incremental decoder from raw body chunks to `data:` payloads.
#[derive(Debug, Default)]
pub struct SseDecoder {
    /// Trailing bytes of an incomplete UTF-8 sequence.
    pending_bytes: Vec<u8>,
    /// Text after the last newline seen so far.
    line_buffer: String,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the `[DONE]` sentinel has been seen.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Feed one chunk and return every frame completed by it, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        if self.done {
            return Vec::new();
        }

        let text = self.decode_utf8(chunk);
        self.line_buffer.push_str(&text);

        let mut frames = Vec::new();
        while let Some(pos) = self.line_buffer.find('\n') {
            let line: String = self.line_buffer.drain(..=pos).collect();
            if self.push_line(&line, &mut frames) {
                self.line_buffer.clear();
                break;
            }
        }
        frames
    }

    /// Flush a trailing line that was never terminated by a newline.
    pub fn finish(&mut self) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        if self.done {
            return frames;
        }
        if !self.pending_bytes.is_empty() {
            let tail = String::from_utf8_lossy(&self.pending_bytes).into_owned();
            self.pending_bytes.clear();
            self.line_buffer.push_str(&tail);
        }
        let line = std::mem::take(&mut self.line_buffer);
        self.push_line(&line, &mut frames);
        frames
    }

    /// Returns true when the line was the done marker.
    fn push_line(&mut self, line: &str, frames: &mut Vec<SseFrame>) -> bool {
        let line = line.trim();
        if line.is_empty() {
            return false;
        }
        match parse_sse_line(line) {
            Some(data) if is_done_marker(data) => {
                self.done = true;
                frames.push(SseFrame::Done);
                true
            }
            Some(data) => {
                frames.push(SseFrame::Data(data.to_string()));
                false
            }
            None => false,
        }
    }

    /// Decode as much of `pending + chunk` as forms complete UTF-8, keeping an
    /// incomplete trailing sequence for the next call. Invalid bytes become
    /// U+FFFD.
    fn decode_utf8(&mut self, chunk: &[u8]) -> String {
        self.pending_bytes.extend_from_slice(chunk);
        let bytes = std::mem::take(&mut self.pending_bytes);

        let mut text = String::with_capacity(bytes.len());
        let mut rest = bytes.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(valid) => {
                    text.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    // already checked by from_utf8
                    text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        Some(len) => {
                            text.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.pending_bytes = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        text
    }
}

/// Turn a stream of body chunks into a stream of SSE `data:` payloads.
///
/// The stream ends after `[DONE]` or when the body ends. A transport error is
/// yielded once and ends the stream.
pub fn sse_data_stream<S, E>(byte_stream: S) -> impl Stream<Item = Result<String, ClientError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<ClientError> + Send + 'static,
{
    stream::unfold(
        (Box::pin(byte_stream), SseDecoder::new(), false),
        |(mut byte_stream, mut decoder, finished)| async move {
            if finished {
                return None;
            }
            match byte_stream.next().await {
                Some(Ok(chunk)) => {
                    let frames = decoder.feed(&chunk);
                    let done = decoder.is_done();
                    Some((frames_to_items(frames), (byte_stream, decoder, done)))
                }
                Some(Err(e)) => Some((vec![Err(e.into())], (byte_stream, decoder, true))),
                None => {
                    let frames = decoder.finish();
                    Some((frames_to_items(frames), (byte_stream, decoder, true)))
                }
            }
        },
    )
    .flat_map(stream::iter)
}

fn frames_to_items(frames: Vec<SseFrame>) -> Vec<Result<String, ClientError>> {
    frames
        .into_iter()
        .filter_map(|frame| match frame {
            SseFrame::Data(data) => Some(Ok(data)),
            SseFrame::Done => None,
        })
        .collect()
}

/// Parse an SSE line to extract the data portion.
///
/// SSE lines are in the format: `data: <content>`; the space is optional.
///
/// # Example
/// ```
/// use ai_toolkit::sse::parse_sse_line;
///
/// let line = "data: {\"key\": \"value\"}";
/// assert_eq!(parse_sse_line(line), Some("{\"key\": \"value\"}"));
///
/// let line = "event: thread.run.created";
/// assert_eq!(parse_sse_line(line), None);
/// ```
pub fn parse_sse_line(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(|s| s.trim())
}

/// Check if an SSE data line indicates the stream is done.
///
/// # Example
/// ```
/// use ai_toolkit::sse::is_done_marker;
///
/// assert!(is_done_marker("[DONE]"));
/// assert!(!is_done_marker(""));
/// assert!(!is_done_marker("{\"data\": \"value\"}"));
/// ```
pub fn is_done_marker(data: &str) -> bool {
    data == "[DONE]"
}
