//! Completion requester
//!
//! One trait, one production implementation (`OpenAI` chat completions), and
//! a logging decorator. A request carries the full transcript snapshot plus
//! the model/temperature in force when the user submitted; the reply is plain
//! text. Exactly one attempt per call: no retry, no backoff, no streaming.

mod error;
mod openai;

#[cfg(test)]
pub mod testing;

pub use error::{LlmError, LlmErrorKind};
pub use openai::{API_KEY_ENV_VAR, OpenAIClient};

use crate::conversation::{Message, Model};
use async_trait::async_trait;
use std::sync::Arc;

/// One request to the remote completion service: the transcript is sent in
/// order and verbatim, system message included.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: Model,
    pub temperature: f32,
    pub messages: Vec<Message>,
}

/// Common interface for completion clients
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Make one completion attempt. Every fault comes back as an `LlmError`;
    /// nothing propagates past this boundary.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

/// Logging wrapper for completion clients
pub struct LoggingClient {
    inner: Arc<dyn CompletionClient>,
}

impl LoggingClient {
    pub fn new(inner: Arc<dyn CompletionClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CompletionClient for LoggingClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %request.model,
                    duration_ms = %duration.as_millis(),
                    reply_chars = reply.chars().count(),
                    "Completion request finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %request.model,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Completion request failed"
                );
            }
        }

        result
    }
}
