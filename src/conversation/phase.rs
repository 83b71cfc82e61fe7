//! Session phase machine
//!
//! One conversation cycles between two phases: waiting for input and waiting
//! for the remote reply. The transition function is pure; the session layer
//! applies it under its lock and surfaces `PhaseError::Busy` as a rejected
//! submission. There is no cancellation of an in-flight request.

use thiserror::Error;

/// Where a session currently is in the submit/reply cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionPhase {
    /// Awaiting user input
    #[default]
    Idle,
    /// A completion request is in flight
    AwaitingReply,
}

impl SessionPhase {
    /// True while a completion request is in flight
    pub fn is_busy(self) -> bool {
        matches!(self, SessionPhase::AwaitingReply)
    }
}

/// Events that drive the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// A non-empty user submission was accepted
    SubmissionAccepted,
    /// The cycle finished, with either a genuine reply or a fault string
    CycleFinished,
}

/// Errors from invalid phase transitions
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PhaseError {
    #[error("a request is already in flight")]
    Busy,
    #[error("no request is in flight")]
    NotInFlight,
}

/// Pure transition function: same inputs, same outputs, no side effects.
pub fn transition(phase: SessionPhase, event: PhaseEvent) -> Result<SessionPhase, PhaseError> {
    match (phase, event) {
        (SessionPhase::Idle, PhaseEvent::SubmissionAccepted) => Ok(SessionPhase::AwaitingReply),
        (SessionPhase::AwaitingReply, PhaseEvent::CycleFinished) => Ok(SessionPhase::Idle),
        (SessionPhase::AwaitingReply, PhaseEvent::SubmissionAccepted) => Err(PhaseError::Busy),
        (SessionPhase::Idle, PhaseEvent::CycleFinished) => Err(PhaseError::NotInFlight),
    }
}
