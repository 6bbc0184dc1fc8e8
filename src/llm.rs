//! Reply engine abstraction
//!
//! Provides a common interface for producing topic-scoped replies, with
//! Gemini as the concrete backend.

mod error;
mod gemini;

#[cfg(test)]
pub mod testing;

pub use error::{EngineError, EngineErrorKind};
pub use gemini::{GeminiConfig, GeminiEngine};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for reply engines
#[async_trait]
pub trait ReplyEngine: Send + Sync {
    /// Produce one reply to `message`, scoped to `topic`
    async fn reply(&self, topic: &str, message: &str) -> Result<String, EngineError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for reply engines
pub struct LoggingEngine {
    inner: Arc<dyn ReplyEngine>,
    model_id: String,
}

impl LoggingEngine {
    pub fn new(inner: Arc<dyn ReplyEngine>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl ReplyEngine for LoggingEngine {
    async fn reply(&self, topic: &str, message: &str) -> Result<String, EngineError> {
        let start = std::time::Instant::now();
        let result = self.inner.reply(topic, message).await;
        let duration = start.elapsed();

        match &result {
            Ok(text) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    reply_chars = text.len(),
                    "Reply request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Reply request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
