//! Wire types for the chat exchange endpoint
//!
//! Shared by the reply server and every client of it, so the two sides
//! cannot drift apart.

use serde::{Deserialize, Serialize};

/// Request body for `POST /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message, as typed
    #[serde(default)]
    pub message: String,
    /// The active conversation topic
    #[serde(default)]
    pub topic: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            topic: topic.into(),
        }
    }
}

/// Response body for `POST /chat`. Exactly one field is populated; error
/// bodies use the same shape on every status so clients can always recover
/// the `error` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChatReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    pub fn response(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response: None,
            error: Some(message.into()),
        }
    }
}
