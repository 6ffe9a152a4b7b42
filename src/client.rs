//! Core brain traits and error types.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use reqwest::StatusCode;
use thiserror::Error;

use crate::options::{HttpTransport, TransportOptions};

/// Errors that can occur during brain operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// A required input was missing or empty. Raised before any request is sent.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response was well formed but could not be used.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

/// Stream of incremental text fragments produced by a streaming brain.
pub type DeltaStream = Pin<Box<dyn Stream<Item = Result<String, ClientError>> + Send>>;

/// A capability-specific adapter over one OpenAI API.
///
/// Each brain defines its own options, input and output types. The static
/// [`Brain::request`] takes explicit options; the instance methods use the
/// options stored in the brain.
///
/// # Example
/// ```rust,ignore
/// pub struct MyBrain {
///     options: MyOptions,
///     transport_options: TransportOptions<HttpTransport>,
/// }
///
/// impl Brain for MyBrain {
///     type Options = MyOptions;
///     type Input = str;
///     type Output = String;
///
///     async fn request(
///         input: &str,
///         options: &MyOptions,
///         transport_options: &TransportOptions<HttpTransport>,
///     ) -> Result<String, ClientError> {
///         // Implementation
///     }
///
///     fn new(options: MyOptions, transport_options: TransportOptions<HttpTransport>) -> Self {
///         Self { options, transport_options }
///     }
///
///     fn options(&self) -> &MyOptions {
///         &self.options
///     }
///
///     fn transport_options(&self) -> &TransportOptions<HttpTransport> {
///         &self.transport_options
///     }
/// }
/// ```
#[async_trait]
pub trait Brain: Send + Sync + Sized {
    /// Capability-specific configuration.
    type Options: Send + Sync;

    /// What the caller hands in (text, audio clip, image prompt).
    type Input: ?Sized + Sync;

    /// What one successful exchange produces.
    type Output: Send;

    /// Core static request method that must be implemented by each brain.
    ///
    /// Performs exactly one logical exchange and returns its result.
    async fn request(
        input: &Self::Input,
        options: &Self::Options,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<Self::Output, ClientError>;

    /// Create a brain that stores `options` for the instance methods.
    fn new(options: Self::Options, transport_options: TransportOptions<HttpTransport>) -> Self;

    fn options(&self) -> &Self::Options;

    fn transport_options(&self) -> &TransportOptions<HttpTransport>;

    /// Send input using the options stored in the brain.
    async fn send(&self, input: &Self::Input) -> Result<Self::Output, ClientError> {
        Self::request(input, self.options(), self.transport_options()).await
    }

    /// Send input, overriding the stored options for this call only.
    async fn send_with_options(
        &self,
        input: &Self::Input,
        options: &Self::Options,
    ) -> Result<Self::Output, ClientError> {
        Self::request(input, options, self.transport_options()).await
    }
}

/// Extension trait for brains that can deliver their output incrementally.
///
/// The returned stream yields each text delta as soon as it is decoded and
/// ends when the server signals completion. A transport failure mid-stream
/// is delivered as a final `Err` item. Dropping the stream cancels the
/// exchange.
#[async_trait]
pub trait StreamingBrain: Brain {
    async fn request_stream(
        input: &Self::Input,
        options: &Self::Options,
        transport_options: &TransportOptions<HttpTransport>,
    ) -> Result<DeltaStream, ClientError>;

    async fn send_stream(&self, input: &Self::Input) -> Result<DeltaStream, ClientError> {
        Self::request_stream(input, self.options(), self.transport_options()).await
    }

    async fn send_stream_with_options(
        &self,
        input: &Self::Input,
        options: &Self::Options,
    ) -> Result<DeltaStream, ClientError> {
        Self::request_stream(input, options, self.transport_options()).await
    }
}
