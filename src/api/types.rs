//! API request and response types

use crate::conversation::{Message, Model};
use crate::session::Session;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

/// Request to change the session settings
#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub model: Model,
    pub temperature: f32,
}

/// The page's render source: the visible transcript plus current settings
#[derive(Debug, Serialize)]
pub struct ConversationView {
    pub messages: Vec<Message>,
    pub model: Model,
    pub temperature: f32,
    pub busy: bool,
}

impl ConversationView {
    pub fn from_session(session: &Session) -> Self {
        let conversation = session.conversation();
        Self {
            messages: conversation.visible_messages().cloned().collect(),
            model: conversation.model(),
            temperature: conversation.temperature(),
            busy: session.phase().is_busy(),
        }
    }
}

/// Response for a chat cycle. `reply` is absent when the input was blank.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    pub conversation: ConversationView,
}

/// One entry in the model picker
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: String,
    pub description: String,
}

/// Response for the model list
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
    pub default: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
