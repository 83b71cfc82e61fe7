//! Conversation state for one tutoring session
//!
//! The transcript (role-tagged messages) plus the model/temperature settings,
//! and the two-phase submit/reply machine the session layer drives. State
//! lives in memory only; nothing here survives a process restart.

mod phase;
mod state;

#[cfg(test)]
mod proptests;

pub use phase::{transition, PhaseError, PhaseEvent, SessionPhase};
pub use state::{ConversationState, Message, Model, Role, DEFAULT_TEMPERATURE};
