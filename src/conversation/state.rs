//! Conversation state types
//!
//! The transcript is an ordered list of role-tagged messages. Exactly one
//! system message exists at all times and it is always the first element; the
//! only mutations are appending user/assistant turns, replacing the whole
//! transcript on reset, and direct writes to the two settings.

use crate::system_prompt::DEFAULT_SYSTEM_PROMPT;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Origin of a message in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Behavioral instruction; never rendered in the transcript view
    System,
    /// Human input
    User,
    /// Generated reply, or a fault string standing in for one
    Assistant,
}

/// A single transcript entry. Immutable once created; identity is positional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Supported completion models.
///
/// Closed set: the picker, the settings endpoint and the outbound wire format
/// all speak these identifiers and nothing else, so an unsupported model is
/// unrepresentable rather than rejected at runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Model {
    #[default]
    #[serde(rename = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[serde(rename = "gpt-4")]
    Gpt4,
}

impl Model {
    /// All supported models, in picker order
    pub fn all() -> &'static [Model] {
        &[Model::Gpt35Turbo, Model::Gpt4]
    }

    /// Identifier sent to the completion API (same string the picker shows)
    pub fn api_name(self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4 => "gpt-4",
        }
    }

    /// One-line description for the model picker
    pub fn description(self) -> &'static str {
        match self {
            Model::Gpt35Turbo => "Best for speed and cost",
            Model::Gpt4 => "Higher quality, slower",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Sampling temperature for a fresh conversation
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Transcript plus the two user-adjustable settings for one session.
///
/// Settings survive `reset`; the transcript does not. `temperature` is stored
/// exactly as given: the slider is range-clamped at the source and nothing
/// downstream validates or clamps, so callers own range discipline.
#[derive(Debug, Clone)]
pub struct ConversationState {
    messages: Vec<Message>,
    model: Model,
    temperature: f32,
}

impl ConversationState {
    /// Fresh conversation: one system message, default settings
    pub fn new() -> Self {
        Self {
            messages: vec![Message::system(DEFAULT_SYSTEM_PROMPT)],
            model: Model::default(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Replace the transcript with a fresh system message, keeping settings
    pub fn reset(&mut self) {
        self.messages = vec![Message::system(DEFAULT_SYSTEM_PROMPT)];
    }

    /// Append a user turn. Empty input is a no-op.
    pub fn append_user(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.messages.push(Message::user(text));
    }

    /// Append an assistant turn. The text may be a genuine reply or a
    /// pre-formatted fault string; the transcript does not distinguish them.
    pub fn append_assistant(&mut self, text: &str) {
        self.messages.push(Message::assistant(text));
    }

    pub fn set_model(&mut self, model: Model) {
        self.model = model;
    }

    /// Store a new temperature without clamping or validation
    pub fn set_temperature(&mut self, temperature: f32) {
        self.temperature = temperature;
    }

    /// Owned copy of the transcript for hand-off to the completion client,
    /// unaffected by later mutation of the live state
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages().to_vec()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Messages the transcript view renders (everything but the system turn)
    pub fn visible_messages(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().filter(|m| m.role != Role::System)
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn temperature(&self) -> f32 {
        self.temperature
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}
