//! HTTP API for the reply server

mod handlers;

pub use handlers::create_router;

use crate::llm::ReplyEngine;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn ReplyEngine>,
}

impl AppState {
    pub fn new(engine: Arc<dyn ReplyEngine>) -> Self {
        Self { engine }
    }
}
