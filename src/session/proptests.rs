//! Property-based tests for the session state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::effect::{Effect, FocusTarget};
use super::event::{Event, ExchangeOutcome};
use super::state::SessionState;
use super::transition::transition;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Topics as they exist inside `Conversing`: trimmed and non-empty
fn arb_topic() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 .,'-]{0,30}[a-zA-Z0-9]?".prop_map(|t| t.trim().to_string())
}

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop_oneof![
        Just(SessionState::Selecting),
        arb_topic().prop_map(|topic| SessionState::Conversing { topic }),
    ]
}

fn arb_outcome() -> impl Strategy<Value = ExchangeOutcome> {
    prop_oneof![
        ".{0,60}".prop_map(ExchangeOutcome::Reply),
        "[a-zA-Z0-9 ]{0,40}".prop_map(ExchangeOutcome::ApplicationError),
        Just(ExchangeOutcome::Empty),
        "[a-zA-Z0-9 !:.]{0,40}".prop_map(ExchangeOutcome::TransportFailure),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        ".{0,60}".prop_map(|text| Event::TopicSubmitted { text }),
        Just(Event::RestartRequested),
        ".{0,60}".prop_map(|text| Event::MessageSubmitted { text }),
        arb_outcome().prop_map(|outcome| Event::ExchangeResolved { outcome }),
    ]
}

// ============================================================================
// State Validity Checkers
// ============================================================================

fn is_valid_state(state: &SessionState) -> bool {
    match state {
        SessionState::Selecting => true,
        // The topic invariant: trimmed, never blank
        SessionState::Conversing { topic } => !topic.is_empty() && topic.trim() == topic,
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    // Invariant 1: the transition function is total and preserves state
    // validity across arbitrary event sequences
    #[test]
    fn prop_transitions_preserve_validity(
        events in proptest::collection::vec(arb_event(), 0..20)
    ) {
        let mut state = SessionState::Selecting;

        for event in events {
            let result = transition(&state, event);
            state = result.new_state;
            prop_assert!(is_valid_state(&state), "Invalid state: {:?}", state);
        }
    }

    // Invariant 2: no exchange can begin without an active topic
    #[test]
    fn prop_selecting_never_begins_an_exchange(event in arb_event()) {
        let result = transition(&SessionState::Selecting, event);
        prop_assert!(
            !result.effects.iter().any(|e| matches!(e, Effect::BeginExchange { .. })),
            "Selecting emitted an exchange: {:?}",
            result.effects
        );
    }

    // Invariant 3: a begun exchange always carries the active topic and the
    // text exactly as submitted
    #[test]
    fn prop_exchanges_carry_topic_and_text(topic in arb_topic(), text in ".{0,60}") {
        prop_assume!(!topic.is_empty());
        prop_assume!(!text.trim().is_empty());

        let state = SessionState::Conversing { topic: topic.clone() };
        let result = transition(&state, Event::MessageSubmitted { text: text.clone() });

        let exchange = result.effects.iter().find_map(|e| match e {
            Effect::BeginExchange { topic, message } => Some((topic.clone(), message.clone())),
            _ => None,
        });
        prop_assert_eq!(exchange, Some((topic, text)));
    }

    // Invariant 4: every resolution removes the pending row first and ends
    // with the composer re-enabled and focused, whatever the outcome
    #[test]
    fn prop_resolution_always_restores_the_composer(
        topic in arb_topic(),
        outcome in arb_outcome()
    ) {
        prop_assume!(!topic.is_empty());

        let state = SessionState::Conversing { topic };
        let result = transition(&state, Event::ExchangeResolved { outcome });

        prop_assert_eq!(result.effects.first(), Some(&Effect::ClearPending));
        let n = result.effects.len();
        prop_assert!(n >= 3);
        prop_assert_eq!(&result.effects[n - 2], &Effect::SetComposerEnabled(true));
        prop_assert_eq!(&result.effects[n - 1], &Effect::Focus(FocusTarget::Composer));
    }

    // Invariant 5: whitespace-only sends are complete no-ops
    #[test]
    fn prop_whitespace_sends_are_no_ops(topic in arb_topic(), ws in "[ \t\n]{0,10}") {
        prop_assume!(!topic.is_empty());

        let state = SessionState::Conversing { topic: topic.clone() };
        let result = transition(&state, Event::MessageSubmitted { text: ws });

        prop_assert_eq!(result.new_state, state);
        prop_assert!(result.effects.is_empty());
    }

    // Invariant 6: entering a conversation always trims the topic, and the
    // display effect echoes it exactly
    #[test]
    fn prop_topics_are_trimmed_on_entry(raw in " {0,3}[a-zA-Z][a-zA-Z0-9 ]{0,30}") {
        let result = transition(
            &SessionState::Selecting,
            Event::TopicSubmitted { text: raw.clone() },
        );

        match result.new_state {
            SessionState::Conversing { ref topic } => {
                prop_assert_eq!(topic.as_str(), raw.trim());
                let display = result.effects.iter().find_map(|e| match e {
                    Effect::SetTopicDisplay(t) => Some(t.clone()),
                    _ => None,
                });
                prop_assert_eq!(display, Some(topic.clone()));
            }
            SessionState::Selecting => prop_assert!(raw.trim().is_empty()),
        }
    }

    // Invariant 7: restart from anywhere lands in Selecting with the full
    // reset sequence
    #[test]
    fn prop_restart_always_fully_resets(state in arb_state()) {
        let result = transition(&state, Event::RestartRequested);

        prop_assert_eq!(result.new_state, SessionState::Selecting);
        prop_assert!(result.effects.contains(&Effect::ClearThread));
        prop_assert!(result.effects.contains(&Effect::ClearPending));
        prop_assert!(result.effects.contains(&Effect::SetComposerEnabled(true)));
    }
}

// ============================================================================
// Sequence Tests
// ============================================================================

/// Walk a whole session: topic, send, resolve, restart
#[test]
fn full_session_walkthrough() {
    let mut state = SessionState::Selecting;

    let result = transition(
        &state,
        Event::TopicSubmitted {
            text: "Rust".to_string(),
        },
    );
    state = result.new_state;
    assert!(state.is_conversing());

    let result = transition(
        &state,
        Event::MessageSubmitted {
            text: "hello".to_string(),
        },
    );
    state = result.new_state;
    assert!(result
        .effects
        .iter()
        .any(|e| matches!(e, Effect::BeginExchange { .. })));

    let result = transition(
        &state,
        Event::ExchangeResolved {
            outcome: ExchangeOutcome::Reply("hi".to_string()),
        },
    );
    state = result.new_state;
    assert_eq!(state.topic(), Some("Rust"));

    let result = transition(&state, Event::RestartRequested);
    assert_eq!(result.new_state, SessionState::Selecting);
}

/// A restart while an exchange is in flight leaves nothing for the late
/// outcome to touch
#[test]
fn restart_mid_flight_then_late_outcome() {
    let mut state = SessionState::Conversing {
        topic: "Rust".to_string(),
    };

    let result = transition(
        &state,
        Event::MessageSubmitted {
            text: "hello".to_string(),
        },
    );
    state = result.new_state;

    let result = transition(&state, Event::RestartRequested);
    state = result.new_state;
    assert_eq!(state, SessionState::Selecting);

    let result = transition(
        &state,
        Event::ExchangeResolved {
            outcome: ExchangeOutcome::Reply("too late".to_string()),
        },
    );
    assert_eq!(result.new_state, SessionState::Selecting);
    assert!(result.effects.is_empty());
}
