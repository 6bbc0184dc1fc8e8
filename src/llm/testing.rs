//! Mock implementations for testing

use super::{EngineError, ReplyEngine};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock reply engine that returns pre-configured results
pub struct MockReplyEngine {
    results: Mutex<VecDeque<Result<String, EngineError>>>,
    /// Record of (topic, message) pairs received
    pub calls: Mutex<Vec<(String, String)>>,
}

impl MockReplyEngine {
    pub fn new() -> Self {
        Self {
            results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, text: impl Into<String>) {
        self.results.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn queue_error(&self, error: EngineError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    pub fn recorded_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockReplyEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyEngine for MockReplyEngine {
    async fn reply(&self, topic: &str, message: &str) -> Result<String, EngineError> {
        self.calls
            .lock()
            .unwrap()
            .push((topic.to_string(), message.to_string()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(EngineError::unknown("No mock reply queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}
