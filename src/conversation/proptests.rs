//! Property-based tests for conversation invariants
//!
//! Drives arbitrary mutation sequences against the transcript and checks the
//! structural invariants: exactly one system message, always first; reset
//! preserves settings; snapshots never alias live state; temperature is
//! stored pass-through.

use super::{
    transition, ConversationState, Model, PhaseEvent, Role, SessionPhase,
};
use proptest::prelude::*;

// ============================================================================
// Generators
// ============================================================================

/// A single mutation against the conversation state
#[derive(Debug, Clone)]
enum Op {
    AppendUser(String),
    AppendAssistant(String),
    Reset,
    SetModel(Model),
    SetTemperature(f32),
}

fn arb_model() -> impl Strategy<Value = Model> {
    prop_oneof![Just(Model::Gpt35Turbo), Just(Model::Gpt4)]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        ".{0,20}".prop_map(Op::AppendUser),
        ".{0,20}".prop_map(Op::AppendAssistant),
        Just(Op::Reset),
        arb_model().prop_map(Op::SetModel),
        (0.0f32..=1.0).prop_map(Op::SetTemperature),
    ]
}

fn arb_phase_event() -> impl Strategy<Value = PhaseEvent> {
    prop_oneof![
        Just(PhaseEvent::SubmissionAccepted),
        Just(PhaseEvent::CycleFinished),
    ]
}

fn apply(state: &mut ConversationState, op: &Op) {
    match op {
        Op::AppendUser(text) => state.append_user(text),
        Op::AppendAssistant(text) => state.append_assistant(text),
        Op::Reset => state.reset(),
        Op::SetModel(model) => state.set_model(*model),
        Op::SetTemperature(temperature) => state.set_temperature(*temperature),
    }
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// The system message is never duplicated, removed, or displaced.
    #[test]
    fn prop_system_message_stays_first_and_unique(
        ops in prop::collection::vec(arb_op(), 0..40),
    ) {
        let mut state = ConversationState::new();
        for op in &ops {
            apply(&mut state, op);
            let system_count = state
                .messages()
                .iter()
                .filter(|m| m.role == Role::System)
                .count();
            prop_assert_eq!(system_count, 1);
            prop_assert_eq!(state.messages()[0].role, Role::System);
        }
    }

    /// Reset always collapses the transcript to one system message and never
    /// touches the settings.
    #[test]
    fn prop_reset_preserves_settings(
        ops in prop::collection::vec(arb_op(), 0..40),
        model in arb_model(),
        temperature in 0.0f32..=1.0,
    ) {
        let mut state = ConversationState::new();
        for op in &ops {
            apply(&mut state, op);
        }
        state.set_model(model);
        state.set_temperature(temperature);

        state.reset();

        prop_assert_eq!(state.messages().len(), 1);
        prop_assert_eq!(state.messages()[0].role, Role::System);
        prop_assert_eq!(state.model(), model);
        prop_assert!((state.temperature() - temperature).abs() < f32::EPSILON);
    }

    /// Snapshots are owned copies, unaffected by later mutation.
    #[test]
    fn prop_snapshot_does_not_alias_live_state(
        before in prop::collection::vec(arb_op(), 0..20),
        after in prop::collection::vec(arb_op(), 1..20),
    ) {
        let mut state = ConversationState::new();
        for op in &before {
            apply(&mut state, op);
        }

        let snapshot = state.snapshot();
        let frozen = snapshot.clone();
        for op in &after {
            apply(&mut state, op);
        }

        prop_assert_eq!(snapshot, frozen);
    }

    /// Temperature is stored exactly as given, in range or not.
    #[test]
    fn prop_temperature_is_passed_through(value in -10.0f32..10.0) {
        let mut state = ConversationState::new();
        state.set_temperature(value);
        prop_assert!((state.temperature() - value).abs() < f32::EPSILON);
    }

    /// Non-empty appends land at the tail in submission order.
    #[test]
    fn prop_appends_preserve_order(texts in prop::collection::vec("[a-z]{1,12}", 1..10)) {
        let mut state = ConversationState::new();
        for (i, text) in texts.iter().enumerate() {
            if i % 2 == 0 {
                state.append_user(text);
            } else {
                state.append_assistant(text);
            }
        }

        let tail: Vec<&str> = state
            .messages()
            .iter()
            .skip(1)
            .map(|m| m.content.as_str())
            .collect();
        let expected: Vec<&str> = texts.iter().map(String::as_str).collect();
        prop_assert_eq!(tail, expected);
    }

    /// Every valid phase transition flips the phase; every invalid one is a
    /// typed rejection that leaves it unchanged.
    #[test]
    fn prop_phase_machine_flips_or_rejects(
        events in prop::collection::vec(arb_phase_event(), 0..20),
    ) {
        let mut phase = SessionPhase::default();
        for event in events {
            if let Ok(next) = transition(phase, event) {
                prop_assert_ne!(next, phase);
                phase = next;
            }
            prop_assert_eq!(phase.is_busy(), phase == SessionPhase::AwaitingReply);
        }
    }
}
