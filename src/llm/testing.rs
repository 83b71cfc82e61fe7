//! Mock completion clients for testing
//!
//! These mocks enable session-cycle tests without real I/O.

use super::{CompletionClient, CompletionRequest, LlmError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Mock completion client that returns queued results
#[allow(dead_code)]
pub struct MockCompletionClient {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<CompletionRequest>>,
}

#[allow(dead_code)]
impl MockCompletionClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    /// Queue a fault
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for MockCompletionClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }
}

/// Mock client that parks each request until the test releases it, so tests
/// can observe the in-flight phase.
pub struct GatedMockClient {
    inner: MockCompletionClient,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
    release: Notify,
}

#[allow(dead_code)]
impl GatedMockClient {
    pub fn new() -> Self {
        Self {
            inner: MockCompletionClient::new(),
            request_started: Arc::new(Notify::new()),
            release: Notify::new(),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, text: impl Into<String>) {
        self.inner.queue_reply(text);
    }

    /// Queue a fault
    pub fn queue_error(&self, error: LlmError) {
        self.inner.queue_error(error);
    }

    /// Let the in-flight request finish
    pub fn release(&self) {
        self.release.notify_one();
    }
}

impl Default for GatedMockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for GatedMockClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.request_started.notify_one();
        self.release.notified().await;
        self.inner.complete(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{Message, Model};

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: Model::Gpt35Turbo,
            temperature: 0.2,
            messages: vec![Message::system("s"), Message::user("u")],
        }
    }

    #[tokio::test]
    async fn mock_returns_queued_results_in_order() {
        let mock = MockCompletionClient::new();
        mock.queue_reply("first");
        mock.queue_error(LlmError::auth("bad key"));

        assert_eq!(mock.complete(&request()).await.unwrap(), "first");
        assert!(mock.complete(&request()).await.is_err());
        // Queue exhausted
        assert!(mock.complete(&request()).await.is_err());
        assert_eq!(mock.recorded_requests().len(), 3);
    }

    #[tokio::test]
    async fn gated_mock_waits_for_release() {
        let gated = Arc::new(GatedMockClient::new());
        gated.queue_reply("done");

        let task = tokio::spawn({
            let gated = gated.clone();
            async move { gated.complete(&request()).await }
        });

        gated.request_started.notified().await;
        gated.release();
        assert_eq!(task.await.unwrap().unwrap(), "done");
    }
}
