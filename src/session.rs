//! Session orchestration
//!
//! The glue cycle for one submission: append the user turn, snapshot the
//! transcript, run exactly one completion attempt, append the reply. A fault
//! never escapes the cycle; it is rendered into a fault string and appended
//! to the transcript like any other assistant turn, and the phase always
//! returns to idle.

use crate::conversation::{transition, ConversationState, PhaseEvent, SessionPhase};
use crate::llm::{CompletionClient, CompletionRequest, LlmError};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

/// One conversation plus its submit/reply phase
pub struct Session {
    conversation: ConversationState,
    phase: SessionPhase,
}

impl Session {
    pub fn new() -> Self {
        Self {
            conversation: ConversationState::new(),
            phase: SessionPhase::Idle,
        }
    }

    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    pub fn conversation_mut(&mut self) -> &mut ConversationState {
        &mut self.conversation
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// The session shared between request handlers
pub type SharedSession = Arc<Mutex<Session>>;

/// Errors surfaced to the submitter. Completion faults are never among them;
/// those become fault-string replies.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a request is already in flight")]
    Busy,
}

/// Outcome of one submission
#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Blank input: nothing appended, no call issued
    Ignored,
    /// The cycle ran; the text is the reply or the fault string
    Replied(String),
}

/// Run one full submit/reply cycle.
///
/// The lock is not held across the remote call; the requester works from a
/// snapshot. While the call is in flight the phase stays `AwaitingReply` and
/// further submissions are rejected with `SessionError::Busy`.
pub async fn submit(
    session: &SharedSession,
    client: &Arc<dyn CompletionClient>,
    text: &str,
) -> Result<Submission, SessionError> {
    if text.trim().is_empty() {
        return Ok(Submission::Ignored);
    }

    let request = {
        let mut guard = session.lock().await;
        guard.phase = transition(guard.phase, PhaseEvent::SubmissionAccepted)
            .map_err(|_| SessionError::Busy)?;
        guard.conversation.append_user(text);
        CompletionRequest {
            model: guard.conversation.model(),
            temperature: guard.conversation.temperature(),
            messages: guard.conversation.snapshot(),
        }
    };

    let reply = match client.complete(&request).await {
        Ok(reply) => reply,
        Err(e) => fault_reply(&e),
    };

    let mut guard = session.lock().await;
    guard.conversation.append_assistant(&reply);
    guard.phase = transition(guard.phase, PhaseEvent::CycleFinished).unwrap_or(SessionPhase::Idle);

    Ok(Submission::Replied(reply))
}

/// Render a completion fault as ordinary reply content
fn fault_reply(error: &LlmError) -> String {
    format!("Sorry, I couldn't process your request. Details: {error}")
}
