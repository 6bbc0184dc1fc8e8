//! Trait seams between the session machine and its surfaces
//!
//! These traits enable testing the full send/receive cycle with mock
//! implementations.

use crate::format::MessageBody;
use crate::protocol::{ChatReply, ChatRequest};
use crate::session::{FocusTarget, Sender, View};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// A rendered chat message
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub sender: Sender,
    /// The body as submitted or received
    pub text: String,
    /// Wall-clock label at append time, `h:MM AM/PM`
    pub time_label: String,
    /// Formatted rendering of `text`
    pub body: MessageBody,
}

impl Message {
    pub fn new(sender: Sender, text: impl Into<String>, time_label: impl Into<String>) -> Self {
        let text = text.into();
        let body = MessageBody::from_text(&text);
        Self {
            sender,
            text,
            time_label: time_label.into(),
            body,
        }
    }
}

/// Surface the session renders into.
///
/// Mutations arrive in effect order from the controller; implementations
/// hold whatever view state they need to draw from.
pub trait RenderTarget {
    /// Switch the visible surface
    fn show_view(&mut self, view: View);

    /// Update every location that echoes the active topic
    fn set_topic_display(&mut self, topic: &str);

    /// Append a message to the thread
    fn append_message(&mut self, message: Message);

    /// Drop all messages from the thread
    fn clear_thread(&mut self);

    /// Show the pending placeholder row
    fn show_pending(&mut self);

    /// Remove the pending placeholder row
    fn clear_pending(&mut self);

    /// Set the topic-level error slot (empty string clears it)
    fn set_topic_error(&mut self, text: &str);

    /// Set the chat-level error slot (empty string clears it)
    fn set_chat_error(&mut self, text: &str);

    /// Blank the topic entry field
    fn clear_topic_entry(&mut self);

    /// Blank the message composer
    fn clear_composer(&mut self);

    /// Enable or disable the composer and send control
    fn set_composer_enabled(&mut self, enabled: bool);

    /// Move input focus
    fn focus(&mut self, target: FocusTarget);
}

/// Client for one chat exchange against the reply server
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// Send one message for the given topic
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError>;
}

/// Exchange transport errors. The display text is the failure detail the
/// surface shows, so `Status` renders as its recovered message alone.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Server answered with a non-success status
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Connection, timeout or body-read failure
    #[error("{0}")]
    Network(String),

    /// Success status with an undecodable body
    #[error("{0}")]
    Malformed(String),
}

impl ExchangeError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        ExchangeError::Status {
            status,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        ExchangeError::Network(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        ExchangeError::Malformed(message.into())
    }
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: ExchangeClient + ?Sized> ExchangeClient for Arc<T> {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError> {
        (**self).send(request).await
    }
}
