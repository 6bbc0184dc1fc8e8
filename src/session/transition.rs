//! Pure session transition function

use super::effect::{Effect, FocusTarget, View};
use super::event::{Event, ExchangeOutcome};
use super::state::SessionState;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
/// It is also total: invalid (state, event) combinations produce a visible
/// error effect or nothing at all, never a panic.
pub fn transition(state: &SessionState, event: Event) -> TransitionResult {
    match (state, event) {
        // ============================================================
        // Topic submission
        // ============================================================

        // Any state + TopicSubmitted -> Conversing, or a validation error.
        // Submitting while already conversing simply re-enters with the
        // new topic.
        (_, Event::TopicSubmitted { text }) => {
            let topic = text.trim();
            if topic.is_empty() {
                return TransitionResult::new(state.clone()).with_effect(Effect::SetTopicError(
                    "Please enter a topic to start chatting.".to_string(),
                ));
            }

            let topic = topic.to_string();
            let greeting = format!(
                "Hello! I'm your dedicated assistant for {topic}. \
                 What would you like to know about this topic?"
            );
            TransitionResult::new(SessionState::Conversing {
                topic: topic.clone(),
            })
            .with_effect(Effect::SetTopicError(String::new()))
            .with_effect(Effect::SetTopicDisplay(topic))
            .with_effect(Effect::ClearThread)
            .with_effect(Effect::assistant_message(greeting))
            .with_effect(Effect::SetChatError(String::new()))
            .with_effect(Effect::ShowView(View::Conversation))
            .with_effect(Effect::Focus(FocusTarget::Composer))
        }

        // ============================================================
        // Restart
        // ============================================================

        // Any state + RestartRequested -> Selecting, full reset. The restart
        // control is never disabled, so this can race an in-flight exchange;
        // late outcomes are dropped below, which means the reset must also
        // remove the pending row and re-enable the composer itself.
        (_, Event::RestartRequested) => TransitionResult::new(SessionState::Selecting)
            .with_effect(Effect::ClearTopicEntry)
            .with_effect(Effect::ClearThread)
            .with_effect(Effect::ClearPending)
            .with_effect(Effect::SetChatError(String::new()))
            .with_effect(Effect::SetTopicError(String::new()))
            .with_effect(Effect::SetComposerEnabled(true))
            .with_effect(Effect::ShowView(View::TopicSelection))
            .with_effect(Effect::Focus(FocusTarget::TopicEntry)),

        // ============================================================
        // Message submission
        // ============================================================

        // Selecting + MessageSubmitted -> guard error. No composer is
        // visible in this state, but the machine is total.
        (SessionState::Selecting, Event::MessageSubmitted { .. }) => {
            TransitionResult::new(SessionState::Selecting)
                .with_effect(Effect::SetChatError("Error: No topic selected.".to_string()))
        }

        // Conversing + MessageSubmitted -> begin an exchange. The message
        // is appended and sent exactly as typed; only the emptiness check
        // trims.
        (SessionState::Conversing { topic }, Event::MessageSubmitted { text }) => {
            if text.trim().is_empty() {
                // Whitespace-only sends are silently ignored
                return TransitionResult::new(state.clone());
            }

            TransitionResult::new(state.clone())
                .with_effect(Effect::user_message(text.clone()))
                .with_effect(Effect::ClearComposer)
                .with_effect(Effect::SetChatError(String::new()))
                .with_effect(Effect::SetComposerEnabled(false))
                .with_effect(Effect::ShowPending)
                .with_effect(Effect::BeginExchange {
                    topic: topic.clone(),
                    message: text,
                })
        }

        // ============================================================
        // Exchange resolution
        // ============================================================

        // Conversing + ExchangeResolved -> render the outcome. Every arm
        // removes the pending row first and ends by re-enabling and
        // refocusing the composer, so cleanup runs on every path.
        (SessionState::Conversing { .. }, Event::ExchangeResolved { outcome }) => {
            let result = TransitionResult::new(state.clone()).with_effect(Effect::ClearPending);

            let result = match outcome {
                ExchangeOutcome::Reply(text) => result.with_effect(Effect::assistant_message(text)),

                ExchangeOutcome::ApplicationError(error) => result
                    .with_effect(Effect::SetChatError(format!("AI Error: {error}")))
                    .with_effect(Effect::assistant_message(format!(
                        "Sorry, I encountered an error processing that: {error}"
                    ))),

                ExchangeOutcome::Empty => result
                    .with_effect(Effect::assistant_message("Sorry, I received an empty response.")),

                ExchangeOutcome::TransportFailure(detail) => result
                    .with_effect(Effect::SetChatError(format!(
                        "Network or Server Error: {detail}"
                    )))
                    .with_effect(Effect::assistant_message(format!(
                        "Sorry, I couldn't connect or process the request. Error: {detail}"
                    ))),
            };

            result
                .with_effect(Effect::SetComposerEnabled(true))
                .with_effect(Effect::Focus(FocusTarget::Composer))
        }

        // Selecting + ExchangeResolved -> the session was restarted while
        // the exchange was in flight. The thread it belonged to is gone;
        // drop the outcome.
        (SessionState::Selecting, Event::ExchangeResolved { .. }) => {
            TransitionResult::new(SessionState::Selecting)
        }
    }
}
