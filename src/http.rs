//! HTTP transport shared by every brain.
//!
//! This module provides client construction, authenticated request building,
//! status checking and the plain download used for generated images.

use bytes::Bytes;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, error};

use crate::client::ClientError;
use crate::options::{HttpTransport, TransportOptions};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com";

/// Build a configured HTTP client from transport options.
///
/// This applies common configuration like timeouts and proxies.
///
/// # Example
/// ```ignore
/// let client = build_http_client(&transport_options)?;
/// ```
pub fn build_http_client(
    transport_options: &TransportOptions<HttpTransport>,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    if let Some(timeout) = transport_options.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = &transport_options.provider.proxy {
        if let Ok(proxy) = reqwest::Proxy::all(proxy_url) {
            builder = builder.proxy(proxy);
        }
    }

    builder.build()
}

/// Add extra headers to a request if specified in transport options.
///
/// # Example
/// ```ignore
/// let mut req = client.post(url);
/// req = add_extra_headers(req, &transport_options.provider.extra_headers);
/// ```
pub fn add_extra_headers(
    mut request: RequestBuilder,
    extra_headers: &Option<HashMap<String, String>>,
) -> RequestBuilder {
    if let Some(headers) = extra_headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }
    request
}

/// Join the configured (or default) base URL with an API path.
pub fn endpoint(transport_options: &TransportOptions<HttpTransport>, path: &str) -> String {
    let base = transport_options
        .provider
        .base_url
        .as_deref()
        .unwrap_or(DEFAULT_API_BASE)
        .trim_end_matches('/');
    format!("{}{}", base, path)
}

/// Start an authenticated `POST` to `path`.
///
/// Fails with [`ClientError::Config`] when no API key is configured.
pub fn authorized_post(
    transport_options: &TransportOptions<HttpTransport>,
    path: &str,
) -> Result<RequestBuilder, ClientError> {
    let api_key = transport_options
        .provider
        .api_key
        .as_ref()
        .ok_or_else(|| ClientError::Config("API key is required".to_string()))?;

    let url = endpoint(transport_options, path);
    debug!("POST {}", url);

    let http_client = build_http_client(transport_options)?;
    let req = http_client
        .post(&url)
        .header(AUTHORIZATION, format!("Bearer {}", api_key.expose_secret()));

    Ok(add_extra_headers(req, &transport_options.provider.extra_headers))
}

/// Pass successful responses through; turn anything else into
/// [`ClientError::Status`], reading the body for the error message.
pub async fn ensure_success(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = handle_error_response(status, &body);
    error!("{}", err);
    Err(err)
}

/// `POST` a JSON body and return the successful response unread.
pub async fn send_json<B>(
    transport_options: &TransportOptions<HttpTransport>,
    path: &str,
    body: &B,
) -> Result<Response, ClientError>
where
    B: Serialize + ?Sized + Sync,
{
    let response = authorized_post(transport_options, path)?
        .json(body)
        .send()
        .await?;
    ensure_success(response).await
}

/// `POST` a JSON body and deserialize the JSON response.
pub async fn post_json<B, R>(
    transport_options: &TransportOptions<HttpTransport>,
    path: &str,
    body: &B,
) -> Result<R, ClientError>
where
    B: Serialize + ?Sized + Sync,
    R: DeserializeOwned,
{
    let response = send_json(transport_options, path, body).await?;
    let text = response.text().await?;
    Ok(serde_json::from_str(&text)?)
}

/// Download a resource without credentials (generated image URLs are
/// pre-signed and reject bearer auth).
pub async fn download(
    transport_options: &TransportOptions<HttpTransport>,
    url: &str,
) -> Result<Bytes, ClientError> {
    debug!("GET {}", url);
    let http_client = build_http_client(transport_options)?;
    let response = ensure_success(http_client.get(url).send().await?).await?;
    Ok(response.bytes().await?)
}

/// Handle OpenAI error responses.
pub fn handle_error_response(status: StatusCode, body: &str) -> ClientError {
    let message = match serde_json::from_str::<OpenAiErrorResponse>(body) {
        Ok(error_resp) => match error_resp.error.error_type {
            Some(error_type) => format!("OpenAI error ({}): {}", error_type, error_resp.error.message),
            None => error_resp.error.message,
        },
        Err(_) => body.to_string(),
    };
    ClientError::Status { status, message }
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiError,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAiError {
    #[serde(rename = "type")]
    error_type: Option<String>,
    message: String,
}
