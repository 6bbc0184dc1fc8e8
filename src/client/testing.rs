//! Mock implementations for testing

use super::traits::{ExchangeClient, ExchangeError, Message, RenderTarget};
use crate::protocol::{ChatReply, ChatRequest};
use crate::session::{FocusTarget, View};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

// ============================================================================
// In-Memory Render Target
// ============================================================================

/// Render target that materializes the surface state for assertions
#[derive(Debug)]
pub struct InMemoryRender {
    pub view: View,
    pub topic_display: String,
    pub messages: Vec<Message>,
    pub pending: bool,
    pub topic_error: String,
    pub chat_error: String,
    pub composer_enabled: bool,
    pub focused: Option<FocusTarget>,
    pub topic_entry_clears: u32,
    pub composer_clears: u32,
}

impl InMemoryRender {
    pub fn new() -> Self {
        Self {
            view: View::TopicSelection,
            topic_display: String::new(),
            messages: Vec::new(),
            pending: false,
            topic_error: String::new(),
            chat_error: String::new(),
            composer_enabled: true,
            focused: None,
            topic_entry_clears: 0,
            composer_clears: 0,
        }
    }
}

impl Default for InMemoryRender {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTarget for InMemoryRender {
    fn show_view(&mut self, view: View) {
        self.view = view;
    }

    fn set_topic_display(&mut self, topic: &str) {
        self.topic_display = topic.to_string();
    }

    fn append_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    fn clear_thread(&mut self) {
        self.messages.clear();
    }

    fn show_pending(&mut self) {
        self.pending = true;
    }

    fn clear_pending(&mut self) {
        self.pending = false;
    }

    fn set_topic_error(&mut self, text: &str) {
        self.topic_error = text.to_string();
    }

    fn set_chat_error(&mut self, text: &str) {
        self.chat_error = text.to_string();
    }

    fn clear_topic_entry(&mut self) {
        self.topic_entry_clears += 1;
    }

    fn clear_composer(&mut self) {
        self.composer_clears += 1;
    }

    fn set_composer_enabled(&mut self, enabled: bool) {
        self.composer_enabled = enabled;
    }

    fn focus(&mut self, target: FocusTarget) {
        self.focused = Some(target);
    }
}

// ============================================================================
// Mock Exchange Client
// ============================================================================

/// Mock exchange client that returns pre-configured results
pub struct MockExchangeClient {
    results: Mutex<VecDeque<Result<ChatReply, ExchangeError>>>,
    /// Record of all requests made
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl MockExchangeClient {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, reply: ChatReply) {
        self.results.lock().unwrap().push_back(Ok(reply));
    }

    pub fn queue_error(&self, error: ExchangeError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockExchangeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExchangeClient for MockExchangeClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply, ExchangeError> {
        self.requests.lock().unwrap().push(request.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ExchangeError::network("No mock response queued")))
    }
}
