//! OpenAI Assistants (v2) brain.
//!
//! One turn is three requests against the Threads API:
//!
//! 1. `POST /v1/threads` creates an empty thread.
//! 2. `POST /v1/threads/{id}/messages` appends the user message.
//! 3. `POST /v1/threads/{id}/runs` starts a streamed run of the assistant.
//!
//! The run body is decoded as it arrives and every text delta is yielded as
//! its own stream item. [`Brain::send`] collects the deltas into one string.
//!
//! See: <https://platform.openai.com/docs/api-reference/assistants-streaming>

use async_trait::async_trait;
use futures::TryStreamExt;
use reqwest::Response;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::client::{Brain, ClientError, DeltaStream, StreamingBrain};
use crate::http::{authorized_post, ensure_success};
use crate::model::Role;
use crate::options::{AssistantOptions, HttpTransport, TransportOptions};
use crate::stream::delta_stream;

const THREADS_PATH: &str = "/v1/threads";

const BETA_HEADER: &str = "OpenAI-Beta";
const BETA_VALUE: &str = "assistants=v2";

pub struct AssistantBrain {
    options: AssistantOptions,
    transport_options: TransportOptions<HttpTransport>,
}

impl AssistantBrain {
    /// Create a thread that can be reused across turns with
    /// [`AssistantBrain::send_in_thread`].
    pub async fn create_thread(&self) -> Result<String, ClientError> {
        create_thread(&self.transport_options).await
    }

    /// Run one turn in an existing thread with the stored options.
    pub async fn send_in_thread(
        &self,
        thread_id: &str,
        message: &str,
    ) -> Result<DeltaStream, ClientError> {
        Self::request_stream_in_thread(thread_id, message, &self.options, &self.transport_options)
            .await
    }

    /// Append `message` to `thread_id` and stream the assistant's reply.
    pub async fn request_stream_in_thread(
        thread_id: &str,
        message: &str,
        options: &AssistantOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<DeltaStream, ClientError> {
        check_inputs(message, options)?;
        if thread_id.is_empty() {
            return Err(ClientError::precondition("thread id is empty"));
        }

        match add_message(thread_id, message, transport_options).await {
            Ok(()) => debug!("Message added to thread {}", thread_id),
            Err(err) if options.continue_on_message_error => {
                error!("Failed to add message to thread {}: {}", thread_id, err);
            }
            Err(err) => return Err(err),
        }

        let response = run_stream(thread_id, &options.assistant_id, transport_options).await?;
        info!("Streaming run for assistant {}", options.assistant_id);
        Ok(delta_stream(response.bytes_stream()))
    }
}

#[async_trait]
impl Brain for AssistantBrain {
    type Options = AssistantOptions;
    type Input = str;
    type Output = String;

    async fn request(
        message: &str,
        options: &AssistantOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<String, ClientError> {
        Self::request_stream(message, options, transport_options)
            .await?
            .try_collect::<String>()
            .await
    }

    fn new(options: AssistantOptions, transport_options: TransportOptions<HttpTransport>) -> Self {
        Self {
            options,
            transport_options,
        }
    }

    fn options(&self) -> &AssistantOptions {
        &self.options
    }

    fn transport_options(&self) -> &TransportOptions<HttpTransport> {
        &self.transport_options
    }
}

#[async_trait]
impl StreamingBrain for AssistantBrain {
    async fn request_stream(
        message: &str,
        options: &AssistantOptions,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<DeltaStream, ClientError> {
        check_inputs(message, options)?;

        let thread_id = create_thread(transport_options).await?;
        Self::request_stream_in_thread(&thread_id, message, options, transport_options).await
    }
}

fn check_inputs(message: &str, options: &AssistantOptions) -> Result<(), ClientError> {
    if message.is_empty() {
        return Err(ClientError::precondition("assistant message is empty"));
    }
    if options.assistant_id.is_empty() {
        return Err(ClientError::precondition("assistant id is empty"));
    }
    Ok(())
}

async fn assistant_post<B>(
    transport_options: &TransportOptions<HttpTransport>,
    path: &str,
    body: &B,
) -> Result<Response, ClientError>
where
    B: Serialize + ?Sized + Sync,
{
    let response = authorized_post(transport_options, path)?
        .header(BETA_HEADER, BETA_VALUE)
        .json(body)
        .send()
        .await?;
    ensure_success(response).await
}

async fn create_thread(
    transport_options: &TransportOptions<HttpTransport>,
) -> Result<String, ClientError> {
    let response = assistant_post(transport_options, THREADS_PATH, &EmptyBody {}).await?;
    let text = response.text().await?;
    let thread: ThreadObject = serde_json::from_str(&text)?;

    match thread.id {
        Some(id) if !id.is_empty() => {
            debug!("Created thread {}", id);
            Ok(id)
        }
        _ => Err(ClientError::Protocol("Thread response has no id".to_string())),
    }
}

async fn add_message(
    thread_id: &str,
    content: &str,
    transport_options: &TransportOptions<HttpTransport>,
) -> Result<(), ClientError> {
    let path = format!("{}/{}/messages", THREADS_PATH, thread_id);
    let body = ThreadMessage {
        role: Role::User,
        content,
    };
    assistant_post(transport_options, &path, &body).await?;
    Ok(())
}

async fn run_stream(
    thread_id: &str,
    assistant_id: &str,
    transport_options: &TransportOptions<HttpTransport>,
) -> Result<Response, ClientError> {
    let path = format!("{}/{}/runs", THREADS_PATH, thread_id);
    let body = RunRequest {
        assistant_id,
        stream: true,
    };
    assistant_post(transport_options, &path, &body).await
}

// --- Request/Response Types ---

#[derive(Debug, Serialize)]
struct EmptyBody {}

#[derive(Debug, Serialize)]
struct ThreadMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct RunRequest<'a> {
    assistant_id: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ThreadObject {
    #[serde(default)]
    id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_bodies() {
        assert_eq!(serde_json::to_string(&EmptyBody {}).unwrap(), "{}");
        assert_eq!(
            serde_json::to_value(ThreadMessage {
                role: Role::User,
                content: "Hello"
            })
            .unwrap(),
            json!({"role": "user", "content": "Hello"})
        );
        assert_eq!(
            serde_json::to_value(RunRequest {
                assistant_id: "asst_123",
                stream: true
            })
            .unwrap(),
            json!({"assistant_id": "asst_123", "stream": true})
        );
    }

    #[test]
    fn test_thread_object() {
        let thread: ThreadObject =
            serde_json::from_str(r#"{"id":"thread_abc","object":"thread","created_at":1}"#).unwrap();
        assert_eq!(thread.id.as_deref(), Some("thread_abc"));

        let thread: ThreadObject = serde_json::from_str(r#"{"object":"thread"}"#).unwrap();
        assert!(thread.id.is_none());
    }

    #[test]
    fn test_check_inputs() {
        let options = AssistantOptions::new("asst_123");
        assert!(check_inputs("Hi", &options).is_ok());
        assert!(matches!(
            check_inputs("", &options),
            Err(ClientError::Precondition(_))
        ));
        assert!(matches!(
            check_inputs("Hi", &AssistantOptions::default()),
            Err(ClientError::Precondition(_))
        ));
    }

    #[tokio::test]
    async fn test_precondition_fails_before_network() {
        // No API key: a precondition failure must win over the config error.
        let transport_options = TransportOptions::new(HttpTransport::default());
        let result =
            AssistantBrain::request_stream("", &AssistantOptions::new("asst"), &transport_options)
                .await;
        assert!(matches!(result, Err(ClientError::Precondition(_))));
    }
}
