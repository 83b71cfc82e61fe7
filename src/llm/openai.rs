//! `OpenAI` chat-completions provider implementation
//!
//! The one production `CompletionClient`. The transcript is sent verbatim,
//! system message included, and the reply is the first choice's message
//! content. The API key is read from the environment on every call, so a
//! missing or rotated key surfaces as an auth fault on the next submission
//! rather than at startup.

use super::{CompletionClient, CompletionRequest, LlmError};
use crate::conversation::Message;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Standard service root; `OPENAI_BASE_URL` overrides it
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Environment variable holding the credential, read at call time
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

const BASE_URL_ENV_VAR: &str = "OPENAI_BASE_URL";

/// `OpenAI`-backed completion client
pub struct OpenAIClient {
    client: Client,
    base_url: String,
}

impl OpenAIClient {
    /// Client against the standard service root.
    ///
    /// No request timeout is configured beyond the transport defaults; the
    /// session layer shows a working indicator for however long the call
    /// takes.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client against a custom service root (compatible gateways, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Honors `OPENAI_BASE_URL` when set, otherwise the standard root
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV_VAR) {
            Ok(url) if !url.is_empty() => Self::with_base_url(url),
            _ => Self::new(),
        }
    }

    // The credential is read per call, not cached at construction, so that
    // setting or rotating the key takes effect on the next submission.
    fn api_key() -> Result<String, LlmError> {
        std::env::var(API_KEY_ENV_VAR)
            .map_err(|_| LlmError::auth(format!("{API_KEY_ENV_VAR} is not set")))
    }
}

impl Default for OpenAIClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for OpenAIClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let api_key = Self::api_key()?;

        let openai_request = OpenAIRequest {
            model: request.model.api_name(),
            messages: &request.messages,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    LlmError::network(format!("Connection failed: {e}"))
                } else {
                    LlmError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(classify_http_error(status, &body));
        }

        let openai_response: OpenAIResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::unknown(format!("Failed to parse response: {e} - body: {body}"))
        })?;

        extract_reply(openai_response)
    }
}

/// Map a non-success status (and its body, when decodable) to a fault kind
fn classify_http_error(status: StatusCode, body: &str) -> LlmError {
    if let Ok(error_resp) = serde_json::from_str::<OpenAIErrorResponse>(body) {
        let message = error_resp.error.message;
        return match status.as_u16() {
            401 => LlmError::auth(format!("Authentication failed: {message}")),
            429 => LlmError::rate_limit(format!("Rate limit exceeded: {message}")),
            400 => LlmError::invalid_request(format!("Invalid request: {message}")),
            500..=599 => LlmError::server_error(format!("Server error: {message}")),
            _ => LlmError::unknown(format!("HTTP {status}: {message}")),
        };
    }
    LlmError::unknown(format!("HTTP {status} error: {body}"))
}

/// The reply is the first generated choice's text content
fn extract_reply(response: OpenAIResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::unknown("No choices in response"))
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
    #[allow(dead_code)]
    r#type: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
}
