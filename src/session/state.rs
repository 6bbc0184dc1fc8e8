//! Session state types

use serde::{Deserialize, Serialize};

/// Session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// No topic chosen; the topic-selection surface is visible
    #[default]
    Selecting,

    /// Conversation in progress about a fixed topic.
    /// The topic is always trimmed and non-empty.
    Conversing { topic: String },
}

impl SessionState {
    /// Topic of the active conversation, if any
    pub fn topic(&self) -> Option<&str> {
        match self {
            SessionState::Selecting => None,
            SessionState::Conversing { topic } => Some(topic),
        }
    }

    /// Check if a conversation is active
    pub fn is_conversing(&self) -> bool {
        matches!(self, SessionState::Conversing { .. })
    }
}
