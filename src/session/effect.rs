//! Effects produced by session transitions
//!
//! Effects are render operations plus at most one `BeginExchange`. The
//! transition function emits them in the order the surface must apply them.

/// Which surface the client shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    TopicSelection,
    Conversation,
}

/// Message author
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

impl Sender {
    /// Display label used in message headers
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Assistant => "AI Assistant",
        }
    }
}

/// Input element that can receive focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    TopicEntry,
    Composer,
}

/// Effects to be executed by the surface after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Switch the visible surface
    ShowView(View),

    /// Update every location that echoes the active topic
    SetTopicDisplay(String),

    /// Append a message to the thread
    AppendMessage { sender: Sender, text: String },

    /// Drop all messages from the thread
    ClearThread,

    /// Show the pending placeholder row
    ShowPending,

    /// Remove the pending placeholder row
    ClearPending,

    /// Set the topic-level error slot (empty string clears it)
    SetTopicError(String),

    /// Set the chat-level error slot (empty string clears it)
    SetChatError(String),

    /// Blank the topic entry field
    ClearTopicEntry,

    /// Blank the message composer
    ClearComposer,

    /// Enable or disable the composer and send control
    SetComposerEnabled(bool),

    /// Move input focus
    Focus(FocusTarget),

    /// Start the network exchange for one message
    BeginExchange { topic: String, message: String },
}

impl Effect {
    pub fn user_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant_message(text: impl Into<String>) -> Self {
        Effect::AppendMessage {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}
