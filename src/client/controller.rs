//! Effect execution against a render target

use super::traits::{Message, RenderTarget};
use crate::protocol::ChatRequest;
use crate::session::{transition, Effect, Event, SessionState};
use chrono::Local;

/// Owns the session state and a render target. Events run through the pure
/// transition and the resulting effects are applied to the target in order;
/// an exchange request, when one begins, is handed back to the caller, who
/// performs it and feeds the resolution in as a new event.
pub struct ChatController<R: RenderTarget> {
    state: SessionState,
    render: R,
}

impl<R: RenderTarget> ChatController<R> {
    pub fn new(render: R) -> Self {
        Self {
            state: SessionState::Selecting,
            render,
        }
    }

    /// Process one event. Returns the request for the exchange the event
    /// began, if any.
    pub fn handle(&mut self, event: Event) -> Option<ChatRequest> {
        let result = transition(&self.state, event);
        self.state = result.new_state;

        let mut request = None;
        for effect in result.effects {
            match effect {
                Effect::ShowView(view) => self.render.show_view(view),
                Effect::SetTopicDisplay(topic) => self.render.set_topic_display(&topic),
                Effect::AppendMessage { sender, text } => {
                    self.render.append_message(Message::new(sender, text, time_label()));
                }
                Effect::ClearThread => self.render.clear_thread(),
                Effect::ShowPending => self.render.show_pending(),
                Effect::ClearPending => self.render.clear_pending(),
                Effect::SetTopicError(text) => self.render.set_topic_error(&text),
                Effect::SetChatError(text) => self.render.set_chat_error(&text),
                Effect::ClearTopicEntry => self.render.clear_topic_entry(),
                Effect::ClearComposer => self.render.clear_composer(),
                Effect::SetComposerEnabled(enabled) => self.render.set_composer_enabled(enabled),
                Effect::Focus(target) => self.render.focus(target),
                Effect::BeginExchange { topic, message } => {
                    request = Some(ChatRequest::new(message, topic));
                }
            }
        }
        request
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn render(&self) -> &R {
        &self.render
    }

    pub fn render_mut(&mut self) -> &mut R {
        &mut self.render
    }
}

/// Wall-clock label stamped onto messages as they are appended: 12-hour
/// clock, unpadded hour, `AM`/`PM`
fn time_label() -> String {
    Local::now().format("%-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::InMemoryRender;
    use crate::session::{Sender, View};
    use regex::Regex;

    fn label_pattern() -> Regex {
        Regex::new(r"^(1[0-2]|[1-9]):[0-5][0-9] (AM|PM)$").unwrap()
    }

    #[test]
    fn time_labels_use_a_twelve_hour_clock() {
        let label = time_label();
        assert!(
            label_pattern().is_match(&label),
            "unexpected time label: {label}"
        );
    }

    #[test]
    fn handled_events_mutate_the_render_target() {
        let mut controller = ChatController::new(InMemoryRender::new());

        let request = controller.handle(Event::TopicSubmitted {
            text: "Rust".to_string(),
        });

        assert_eq!(request, None);
        assert!(controller.state().is_conversing());

        let render = controller.render();
        assert_eq!(render.view, View::Conversation);
        assert_eq!(render.topic_display, "Rust");
        assert_eq!(render.messages.len(), 1);
        assert_eq!(render.messages[0].sender, Sender::Assistant);
        assert!(render.messages[0].text.contains("Rust"));
        assert!(label_pattern().is_match(&render.messages[0].time_label));
    }

    #[test]
    fn begun_exchanges_surface_as_requests() {
        let mut controller = ChatController::new(InMemoryRender::new());
        controller.handle(Event::TopicSubmitted {
            text: "Rust".to_string(),
        });

        let request = controller.handle(Event::MessageSubmitted {
            text: "what is a borrow?".to_string(),
        });

        assert_eq!(
            request,
            Some(ChatRequest::new("what is a borrow?", "Rust"))
        );
        assert!(controller.render().pending);
        assert!(!controller.render().composer_enabled);
    }

    #[test]
    fn appended_messages_carry_formatted_bodies() {
        let mut controller = ChatController::new(InMemoryRender::new());
        controller.handle(Event::TopicSubmitted {
            text: "HTML".to_string(),
        });
        controller.handle(Event::MessageSubmitted {
            text: "is <b> allowed?".to_string(),
        });

        let message = controller.render().messages.last().cloned().unwrap();
        assert_eq!(message.sender, Sender::User);
        assert_eq!(message.text, "is <b> allowed?");
        assert_eq!(message.body.to_html(), "<p>is &lt;b&gt; allowed?</p>");
    }
}
