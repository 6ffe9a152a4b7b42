//! End-to-end tests for every brain against an in-process HTTP stub.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::extract::{Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, MethodRouter};
use axum::Router;
use futures::StreamExt;
use reqwest::StatusCode;
use tokio::net::TcpListener;

use ai_toolkit::audio::AudioClip;
use ai_toolkit::catalog::TtsResponseFormat;
use ai_toolkit::client::{Brain, ClientError, StreamingBrain};
use ai_toolkit::model::ImagePrompt;
use ai_toolkit::options::{
    AssistantOptions, ChatOptions, CompletionOptions, HttpTransport, ImageOptions,
    SpeechToTextOptions, TextToSpeechOptions, TransportOptions, VisionOptions,
};
use ai_toolkit::providers::{
    AssistantBrain, ChatBrain, CompletionBrain, ImageBrain, SpeechToTextBrain, TextToSpeechBrain,
    VisionBrain,
};

// --- Stub server ---

type Requests = Arc<Mutex<Vec<Recorded>>>;

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    fn body_json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

/// Canned response for one route.
#[derive(Debug, Clone)]
struct Reply {
    status: u16,
    content_type: &'static str,
    chunks: Vec<Vec<u8>>,
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap();
        let body = if self.chunks.len() == 1 {
            Body::from(self.chunks.concat())
        } else {
            // written in pieces so the client sees a live stream
            let pieces = futures::stream::iter(self.chunks).then(|chunk| async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                Ok::<_, Infallible>(Bytes::from(chunk))
            });
            Body::from_stream(pieces)
        };
        (status, [(CONTENT_TYPE, self.content_type)], body).into_response()
    }
}

#[derive(Debug, Clone)]
struct Route {
    method: &'static str,
    path: String,
    reply: Reply,
}

impl Route {
    fn json(method: &'static str, path: &str, status: u16, body: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            reply: Reply {
                status,
                content_type: "application/json",
                chunks: vec![body.as_bytes().to_vec()],
            },
        }
    }

    fn bytes(method: &'static str, path: &str, content_type: &'static str, body: &[u8]) -> Self {
        Self {
            method,
            path: path.to_string(),
            reply: Reply {
                status: 200,
                content_type,
                chunks: vec![body.to_vec()],
            },
        }
    }

    /// A `text/event-stream` body written in several delayed pieces.
    fn event_stream(path: &str, chunks: &[&str]) -> Self {
        Self {
            method: "POST",
            path: path.to_string(),
            reply: Reply {
                status: 200,
                content_type: "text/event-stream",
                chunks: chunks.iter().map(|c| c.as_bytes().to_vec()).collect(),
            },
        }
    }

    fn into_method_router(self) -> MethodRouter<Requests> {
        let reply = self.reply;
        let handler = move |State(requests): State<Requests>, request: Request| {
            let reply = reply.clone();
            async move {
                record(&requests, request).await;
                reply
            }
        };
        if self.method == "GET" {
            get(handler)
        } else {
            post(handler)
        }
    }
}

async fn record(requests: &Requests, request: Request) {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let headers = parts
        .headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                value.to_str().unwrap_or_default().to_string(),
            )
        })
        .collect();

    requests.lock().unwrap().push(Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        headers,
        body: body.to_vec(),
    });
}

struct StubServer {
    base_url: String,
    requests: Requests,
}

impl StubServer {
    /// Bind to 127.0.0.1:0 and serve the routes built for that base URL.
    async fn start(routes: impl FnOnce(&str) -> Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let requests: Requests = Arc::new(Mutex::new(Vec::new()));

        let mut router: Router<Requests> = Router::new();
        for route in routes(&base_url) {
            let path = route.path.clone();
            router = router.route(&path, route.into_method_router());
        }
        let app = router.with_state(requests.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { base_url, requests }
    }

    fn transport(&self) -> TransportOptions<HttpTransport> {
        TransportOptions::new(HttpTransport::new("test-key").with_base_url(self.base_url.clone()))
            .with_timeout(Duration::from_secs(10))
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

const CHAT_RESPONSE: &str = r#"{
    "id": "chatcmpl-1",
    "object": "chat.completion",
    "choices": [{"index": 0, "message": {"role": "assistant", "content": "Paris"}, "finish_reason": "stop"}],
    "usage": {"prompt_tokens": 20, "completion_tokens": 1, "total_tokens": 21}
}"#;

// --- Chat / completion ---

#[tokio::test]
async fn test_chat_sends_exact_body_and_bearer_auth() {
    let server =
        StubServer::start(|_| vec![Route::json("POST", "/v1/chat/completions", 200, CHAT_RESPONSE)])
            .await;
    let brain = ChatBrain::new(ChatOptions::default(), server.transport());

    let answer = brain.send("Hello").await.unwrap();
    assert_eq!(answer, "Paris");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].header("authorization"), Some("Bearer test-key"));
    assert!(requests[0]
        .header("content-type")
        .unwrap()
        .starts_with("application/json"));
    assert_eq!(
        requests[0].body_text(),
        r#"{"model":"gpt-4o-mini","messages":[{"role":"system","content":"You are a helpful assistant."},{"role":"user","content":"Hello"}],"temperature":1.0,"max_tokens":2048}"#
    );
}

#[tokio::test]
async fn test_chat_error_status() {
    let server = StubServer::start(|_| {
        vec![Route::json(
            "POST",
            "/v1/chat/completions",
            401,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )]
    })
    .await;
    let brain = ChatBrain::new(ChatOptions::default(), server.transport());

    match brain.send("Hello").await {
        Err(ClientError::Status { status, message }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(message.contains("Incorrect API key provided"));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_chat_empty_choices_is_parse_error() {
    let server = StubServer::start(|_| {
        vec![Route::json("POST", "/v1/chat/completions", 200, r#"{"choices":[]}"#)]
    })
    .await;
    let brain = ChatBrain::new(ChatOptions::default(), server.transport());

    assert!(matches!(brain.send("Hello").await, Err(ClientError::Parse(_))));
}

#[tokio::test]
async fn test_empty_message_sends_nothing() {
    let server = StubServer::start(|_| Vec::new()).await;
    let brain = ChatBrain::new(ChatOptions::default(), server.transport());

    assert!(matches!(brain.send("").await, Err(ClientError::Precondition(_))));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_completion_trims_text() {
    let server = StubServer::start(|_| {
        vec![Route::json(
            "POST",
            "/v1/completions",
            200,
            r#"{"choices":[{"text":"\n\n  Bonjour  ","index":0}]}"#,
        )]
    })
    .await;
    let brain = CompletionBrain::new(CompletionOptions::default(), server.transport());

    assert_eq!(brain.send("Say hello in French").await.unwrap(), "Bonjour");

    let body = server.requests()[0].body_json();
    assert_eq!(body["model"], "gpt-3.5-turbo-instruct");
    assert_eq!(
        body["prompt"],
        "You are a helpful assistant.\n\nSay hello in French"
    );
}

// --- Image / vision ---

#[tokio::test]
async fn test_image_generation_downloads_without_auth() {
    let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A];
    let server = StubServer::start(|base_url| {
        let body = format!(
            r#"{{"created":1,"data":[{{"url":"{}/files/img.png","revised_prompt":"A small red fox"}}]}}"#,
            base_url
        );
        vec![
            Route::json("POST", "/v1/images/generations", 200, &body),
            Route::bytes("GET", "/files/img.png", "image/png", &png),
        ]
    })
    .await;
    let brain = ImageBrain::new(ImageOptions::default(), server.transport());

    let image = brain.send("a red fox").await.unwrap();
    assert_eq!(image.bytes.as_ref(), &png);
    assert_eq!(image.revised_prompt.as_deref(), Some("A small red fox"));
    assert!(image.url.ends_with("/files/img.png"));

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    let body = requests[0].body_json();
    assert_eq!(body["model"], "dall-e-3");
    assert_eq!(body["size"], "1024x1024");
    assert_eq!(body["quality"], "standard");
    assert_eq!(body["style"], "vivid");
    assert_eq!(body["response_format"], "url");
    assert_eq!(requests[1].method, "GET");
    assert!(requests[1].header("authorization").is_none());
}

#[tokio::test]
async fn test_image_without_url_is_protocol_error() {
    let server = StubServer::start(|_| {
        vec![Route::json(
            "POST",
            "/v1/images/generations",
            200,
            r#"{"created":1,"data":[]}"#,
        )]
    })
    .await;
    let brain = ImageBrain::new(ImageOptions::default(), server.transport());

    assert!(matches!(
        brain.send("a red fox").await,
        Err(ClientError::Protocol(_))
    ));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_vision_sends_data_uri() {
    let server =
        StubServer::start(|_| vec![Route::json("POST", "/v1/chat/completions", 200, CHAT_RESPONSE)])
            .await;
    let brain = VisionBrain::new(VisionOptions::default(), server.transport());

    let input = ImagePrompt::new(vec![0xFF, 0xD8, 0xFF], "Which city is this?");
    assert_eq!(brain.send(&input).await.unwrap(), "Paris");

    let body = server.requests()[0].body_json();
    let content = &body["messages"][0]["content"];
    assert_eq!(content[0]["type"], "text");
    assert_eq!(content[1]["type"], "image_url");
    assert_eq!(content[1]["image_url"]["url"], "data:image/jpeg;base64,/9j/");
    assert_eq!(body["max_tokens"], 1024);
}

// --- Audio ---

#[tokio::test]
async fn test_speech_to_text_uploads_wav() {
    let server = StubServer::start(|_| {
        vec![Route::json(
            "POST",
            "/v1/audio/transcriptions",
            200,
            r#"{"text":"hello world"}"#,
        )]
    })
    .await;
    let brain = SpeechToTextBrain::new(SpeechToTextOptions::default(), server.transport());

    let clip = AudioClip::new(vec![0.0, 0.5, -0.5, 0.25], 1, 16_000);
    assert_eq!(brain.send(&clip).await.unwrap(), "hello world");

    let request = &server.requests()[0];
    assert!(request
        .header("content-type")
        .unwrap()
        .starts_with("multipart/form-data"));
    assert_eq!(request.header("authorization"), Some("Bearer test-key"));
    let body = request.body_text();
    assert!(body.contains(r#"name="model""#));
    assert!(body.contains("whisper-1"));
    assert!(body.contains(r#"filename="audio_"#));
    assert!(body.contains("audio/wav"));
    assert!(body.contains("RIFF"));
    assert!(body.contains("WAVE"));
}

#[tokio::test]
async fn test_text_to_speech_returns_audio_bytes() {
    let server = StubServer::start(|_| {
        vec![Route::bytes(
            "POST",
            "/v1/audio/speech",
            "audio/mpeg",
            b"ID3fake-mp3",
        )]
    })
    .await;
    let brain = TextToSpeechBrain::new(TextToSpeechOptions::default(), server.transport());

    let audio = brain.send("Hello there").await.unwrap();
    assert_eq!(audio.format, TtsResponseFormat::Mp3);
    assert_eq!(audio.mime_type(), "audio/mpeg");
    assert_eq!(audio.data.as_ref(), b"ID3fake-mp3");

    let body = server.requests()[0].body_json();
    assert_eq!(body["input"], "Hello there");
    assert_eq!(body["voice"], "alloy");
    assert!(body.get("instructions").is_none());
}

// --- Assistant ---

const THREAD_RESPONSE: &str = r#"{"id":"thread_abc","object":"thread","created_at":1}"#;
const MESSAGE_RESPONSE: &str = r#"{"id":"msg_1","object":"thread.message"}"#;

fn run_chunks() -> Vec<&'static str> {
    vec![
        "event: thread.run.created\ndata: {\"id\":\"run_1\",\"object\":\"thread.run\"}\n\n",
        "event: thread.message.delta\ndata: {\"id\":\"msg_1\",\"object\":\"thread.message.delta\",\"delta\":{\"content\":[{\"index\":0,\"type\":\"text\",\"text\":{\"value\":\"Hel",
        "lo\"}}]}}\n\nevent: thread.message.delta\ndata: not-json\n\n",
        "event: thread.message.delta\ndata: {\"delta\":{\"content\":[{\"index\":0,\"type\":\"text\",\"text\":{\"value\":\" world\"}}]}}\n\n",
        "event: done\ndata: [DONE]\n\n",
        "data: {\"delta\":{\"content\":[{\"text\":{\"value\":\"ignored\"}}]}}\n",
    ]
}

fn assistant_routes(message_status: u16) -> Vec<Route> {
    vec![
        Route::json("POST", "/v1/threads", 200, THREAD_RESPONSE),
        Route::json(
            "POST",
            "/v1/threads/thread_abc/messages",
            message_status,
            MESSAGE_RESPONSE,
        ),
        Route::event_stream("/v1/threads/thread_abc/runs", &run_chunks()),
    ]
}

#[tokio::test]
async fn test_assistant_streams_deltas_in_order() {
    let server = StubServer::start(|_| assistant_routes(200)).await;
    let brain = AssistantBrain::new(AssistantOptions::new("asst_123"), server.transport());

    let deltas: Vec<String> = brain
        .send_stream("Hi")
        .await
        .unwrap()
        .map(|delta| delta.unwrap())
        .collect()
        .await;
    assert_eq!(deltas, vec!["Hello".to_string(), " world".to_string()]);

    let requests = server.requests();
    let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/v1/threads",
            "/v1/threads/thread_abc/messages",
            "/v1/threads/thread_abc/runs"
        ]
    );
    for request in &requests {
        assert_eq!(request.header("openai-beta"), Some("assistants=v2"));
        assert_eq!(request.header("authorization"), Some("Bearer test-key"));
    }
    assert_eq!(requests[0].body_text(), "{}");
    assert_eq!(
        requests[1].body_json(),
        serde_json::json!({"role": "user", "content": "Hi"})
    );
    assert_eq!(
        requests[2].body_json(),
        serde_json::json!({"assistant_id": "asst_123", "stream": true})
    );
}

#[tokio::test]
async fn test_assistant_send_collects_stream() {
    let server = StubServer::start(|_| assistant_routes(200)).await;
    let brain = AssistantBrain::new(AssistantOptions::new("asst_123"), server.transport());

    assert_eq!(brain.send("Hi").await.unwrap(), "Hello world");
}

#[tokio::test]
async fn test_assistant_thread_failure_stops_flow() {
    let server = StubServer::start(|_| {
        vec![Route::json(
            "POST",
            "/v1/threads",
            500,
            r#"{"error":{"message":"server error","type":"server_error"}}"#,
        )]
    })
    .await;
    let brain = AssistantBrain::new(AssistantOptions::new("asst_123"), server.transport());

    assert!(matches!(
        brain.send_stream("Hi").await,
        Err(ClientError::Status { .. })
    ));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_assistant_thread_without_id_is_protocol_error() {
    let server =
        StubServer::start(|_| vec![Route::json("POST", "/v1/threads", 200, r#"{"object":"thread"}"#)])
            .await;
    let brain = AssistantBrain::new(AssistantOptions::new("asst_123"), server.transport());

    assert!(matches!(
        brain.send_stream("Hi").await,
        Err(ClientError::Protocol(_))
    ));
}

#[tokio::test]
async fn test_assistant_message_failure_is_fatal_by_default() {
    let server = StubServer::start(|_| assistant_routes(400)).await;
    let brain = AssistantBrain::new(AssistantOptions::new("asst_123"), server.transport());

    assert!(matches!(
        brain.send_stream("Hi").await,
        Err(ClientError::Status { .. })
    ));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_assistant_message_failure_can_continue() {
    let server = StubServer::start(|_| assistant_routes(400)).await;
    let options = AssistantOptions::new("asst_123").with_continue_on_message_error(true);
    let brain = AssistantBrain::new(options, server.transport());

    assert_eq!(brain.send("Hi").await.unwrap(), "Hello world");
    assert_eq!(server.requests().len(), 3);
}

#[tokio::test]
async fn test_assistant_reuses_thread() {
    let server = StubServer::start(|_| assistant_routes(200)).await;
    let brain = AssistantBrain::new(AssistantOptions::new("asst_123"), server.transport());

    let thread_id = brain.create_thread().await.unwrap();
    assert_eq!(thread_id, "thread_abc");

    for _ in 0..2 {
        let deltas: Vec<String> = brain
            .send_in_thread(&thread_id, "Again")
            .await
            .unwrap()
            .filter_map(|delta| async move { delta.ok() })
            .collect()
            .await;
        assert_eq!(deltas.concat(), "Hello world");
    }

    let threads_created = server
        .requests()
        .iter()
        .filter(|r| r.path == "/v1/threads")
        .count();
    assert_eq!(threads_created, 1);
    assert_eq!(server.requests().len(), 5);
}

#[tokio::test]
async fn test_assistant_requires_assistant_id() {
    let server = StubServer::start(|_| assistant_routes(200)).await;
    let brain = AssistantBrain::new(AssistantOptions::default(), server.transport());

    assert!(matches!(
        brain.send_stream("Hi").await,
        Err(ClientError::Precondition(_))
    ));
    assert!(server.requests().is_empty());
}
