//! Chat client core
//!
//! Ties the pure session machine to the impure edges: a [`RenderTarget`]
//! that draws the surface and an [`ExchangeClient`] that performs the wire
//! exchange. [`ChatClient`] is the simplest driver, awaiting each exchange
//! inline; surfaces that need concurrent input (the terminal UI) drive a
//! [`ChatController`] directly and feed resolutions in as they arrive.

mod controller;
mod http;
mod traits;

#[cfg(test)]
pub mod testing;

pub use controller::ChatController;
pub use http::HttpExchangeClient;
pub use traits::{ExchangeClient, ExchangeError, Message, RenderTarget};

use crate::protocol::ChatReply;
use crate::session::{Event, ExchangeOutcome, SessionState};

/// Interpret an exchange result as a session outcome.
///
/// A non-empty `response` wins over everything, then a non-empty `error`;
/// a reply carrying neither is an empty outcome. Empty strings count as
/// absent.
pub fn exchange_outcome(result: Result<ChatReply, ExchangeError>) -> ExchangeOutcome {
    match result {
        Ok(reply) => {
            if let Some(text) = reply.response.filter(|t| !t.is_empty()) {
                ExchangeOutcome::Reply(text)
            } else if let Some(error) = reply.error.filter(|e| !e.is_empty()) {
                ExchangeOutcome::ApplicationError(error)
            } else {
                ExchangeOutcome::Empty
            }
        }
        Err(error) => ExchangeOutcome::TransportFailure(error.to_string()),
    }
}

/// Inline driver for a chat session: each sent message performs its
/// exchange and resolves it before returning.
pub struct ChatClient<R: RenderTarget, X: ExchangeClient> {
    controller: ChatController<R>,
    exchange: X,
}

impl<R: RenderTarget, X: ExchangeClient> ChatClient<R, X> {
    pub fn new(render: R, exchange: X) -> Self {
        Self {
            controller: ChatController::new(render),
            exchange,
        }
    }

    /// Submit a topic. A blank topic leaves the selection view up with a
    /// validation error; anything else enters the conversation.
    pub fn start_session(&mut self, topic: &str) {
        self.controller.handle(Event::TopicSubmitted {
            text: topic.to_string(),
        });
    }

    /// Send one message and resolve its exchange. Whitespace-only input
    /// does nothing.
    pub async fn send_message(&mut self, text: &str) {
        let request = self.controller.handle(Event::MessageSubmitted {
            text: text.to_string(),
        });
        if let Some(request) = request {
            let outcome = exchange_outcome(self.exchange.send(&request).await);
            self.controller.handle(Event::ExchangeResolved { outcome });
        }
    }

    /// Abandon the conversation and return to topic selection.
    pub fn end_session(&mut self) {
        self.controller.handle(Event::RestartRequested);
    }

    pub fn state(&self) -> &SessionState {
        self.controller.state()
    }

    pub fn render(&self) -> &R {
        self.controller.render()
    }

    pub fn exchange(&self) -> &X {
        &self.exchange
    }
}
