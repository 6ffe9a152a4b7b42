//! Streaming support for assistant runs.
//!
//! A streamed run is an SSE body whose `data:` payloads are JSON events.
//! Only `thread.message.delta` events carry text; every other event shape
//! parses to zero deltas. Payloads that are not valid JSON are logged and
//! skipped so one bad line never ends the stream.

use bytes::Bytes;
use futures::stream::{self, Stream, StreamExt};
use serde::Deserialize;
use tracing::warn;

use crate::client::ClientError;
use crate::sse::sse_data_stream;

pub use crate::client::DeltaStream;
pub use crate::sse::{is_done_marker, parse_sse_line, SseDecoder, SseFrame};

/// Wire shape of a `thread.message.delta` event.
#[derive(Debug, Deserialize)]
struct MessageDeltaEvent {
    #[serde(default)]
    delta: Option<MessageDelta>,
}

#[derive(Debug, Deserialize)]
struct MessageDelta {
    #[serde(default)]
    content: Option<Vec<DeltaContent>>,
}

#[derive(Debug, Deserialize)]
struct DeltaContent {
    #[serde(default)]
    text: Option<DeltaText>,
}

#[derive(Debug, Deserialize)]
struct DeltaText {
    #[serde(default)]
    value: Option<String>,
}

/// Extract the text fragments of one event payload, in order.
///
/// Empty and absent values are skipped.
///
/// # Example
/// ```
/// use ai_toolkit::stream::parse_delta_payload;
///
/// let payload = r#"{"delta":{"content":[{"index":0,"type":"text","text":{"value":"Hi"}}]}}"#;
/// assert_eq!(parse_delta_payload(payload).unwrap(), vec!["Hi".to_string()]);
/// assert!(parse_delta_payload("not-json").is_err());
/// ```
pub fn parse_delta_payload(payload: &str) -> Result<Vec<String>, serde_json::Error> {
    let event: MessageDeltaEvent = serde_json::from_str(payload)?;
    let deltas = event
        .delta
        .and_then(|delta| delta.content)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|content| content.text.and_then(|text| text.value))
        .filter(|value| !value.is_empty())
        .collect();
    Ok(deltas)
}

/// Turn a streamed run body into a stream of text deltas.
///
/// Each delta is yielded as soon as its line is complete. The stream ends at
/// `[DONE]` or at the end of the body; a transport error is the last item.
pub fn delta_stream<S, E>(byte_stream: S) -> DeltaStream
where
    S: Stream<Item = Result<Bytes, E>> + Send + 'static,
    E: Into<ClientError> + Send + 'static,
{
    let deltas = sse_data_stream(byte_stream).flat_map(|item| {
        let items: Vec<Result<String, ClientError>> = match item {
            Ok(payload) => match parse_delta_payload(&payload) {
                Ok(deltas) => deltas.into_iter().map(Ok).collect(),
                Err(e) => {
                    warn!("Failed to parse stream data: {} - Error: {}", payload, e);
                    Vec::new()
                }
            },
            Err(e) => vec![Err(e)],
        };
        stream::iter(items)
    });
    Box::pin(deltas)
}
