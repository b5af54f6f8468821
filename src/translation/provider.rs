//! HTTP client for the Anthropic Messages API.
//!
//! The rest of the crate talks to [`TextGenerator`] instead of reqwest,
//! so the workflow can be driven by a scripted generator in tests.

use std::fmt;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::constants::{GENERATION_TIMEOUT, LISTING_TIMEOUT};

/// Protocol revision sent in the `anthropic-version` header.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    BadRequest,
    Auth,
    Permission,
    NotFound,
    Conflict,
    Unprocessable,
    RateLimit,
    ServerError,
    Timeout,
    Connection,
    Unknown,
}

impl ProviderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderErrorKind::BadRequest => "bad request",
            ProviderErrorKind::Auth => "authentication failed",
            ProviderErrorKind::Permission => "permission denied",
            ProviderErrorKind::NotFound => "not found",
            ProviderErrorKind::Conflict => "conflict",
            ProviderErrorKind::Unprocessable => "unprocessable request",
            ProviderErrorKind::RateLimit => "rate limited",
            ProviderErrorKind::ServerError => "server error",
            ProviderErrorKind::Timeout => "request timed out",
            ProviderErrorKind::Connection => "connection failed",
            ProviderErrorKind::Unknown => "unknown error",
        }
    }

    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => ProviderErrorKind::BadRequest,
            401 => ProviderErrorKind::Auth,
            403 => ProviderErrorKind::Permission,
            404 => ProviderErrorKind::NotFound,
            409 => ProviderErrorKind::Conflict,
            422 => ProviderErrorKind::Unprocessable,
            429 => ProviderErrorKind::RateLimit,
            500..=599 => ProviderErrorKind::ServerError,
            _ => ProviderErrorKind::Unknown,
        }
    }
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
#[error("{kind}: {message}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
    pub message: String,
}

/// One fully resolved generation request. The caller decides model and
/// sampling parameters; the provider only moves bytes.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub system: String,
    pub user_content: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
}

pub trait TextGenerator {
    /// Run one generation and return the raw response text.
    fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;

    /// Fetch the provider's model catalog, newest first.
    fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError>;
}

pub struct AnthropicClient {
    http: Client,
    api_key: String,
    base_url: String,
}

// The API key never appears in logs or error output.
impl fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .finish()
    }
}

impl AnthropicClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let http = Client::builder().build().map_err(transport_error)?;
        Ok(AnthropicClient {
            http,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Join a path onto the base URL, keeping any path prefix the
    /// configured base carries.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    data: Vec<ModelInfo>,
}

#[derive(Deserialize)]
struct ApiErrorEnvelope {
    error: Option<ApiErrorDetail>,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl TextGenerator for AnthropicClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
        let payload = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: &request.system,
            messages: vec![WireMessage {
                role: "user",
                content: &request.user_content,
            }],
        };

        tracing::debug!(
            model = %request.model,
            content_len = request.user_content.len(),
            "dispatching generation request"
        );

        let response = self
            .http
            .post(self.endpoint("v1/messages"))
            .timeout(GENERATION_TIMEOUT)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&payload)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(status, &body));
        }

        let body: MessagesResponse = response.json().map_err(transport_error)?;
        Ok(body
            .content
            .into_iter()
            .map(|block| block.text)
            .find(|text| !text.is_empty())
            .unwrap_or_default())
    }

    fn list_models(&self) -> Result<Vec<ModelInfo>, ProviderError> {
        tracing::debug!("fetching model catalog");

        let response = self
            .http
            .get(self.endpoint("v1/models"))
            .timeout(LISTING_TIMEOUT)
            .query(&[("limit", "100")])
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .send()
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(api_error(status, &body));
        }

        let body: ModelsResponse = response.json().map_err(transport_error)?;
        Ok(body.data)
    }
}

fn transport_error(error: reqwest::Error) -> ProviderError {
    let kind = if error.is_timeout() {
        ProviderErrorKind::Timeout
    } else if error.is_connect() {
        ProviderErrorKind::Connection
    } else {
        ProviderErrorKind::Unknown
    };
    ProviderError {
        kind,
        message: error.to_string(),
    }
}

fn api_error(status: StatusCode, body: &str) -> ProviderError {
    let detail = serde_json::from_str::<ApiErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error)
        .map(|error| error.message)
        .filter(|message| !message.is_empty());
    ProviderError {
        kind: ProviderErrorKind::from_status(status),
        message: detail.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
    }
}
