//! HTTP request handlers

use super::AppState;
use crate::protocol::{ChatReply, ChatRequest};
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Chat exchange
        .route("/chat", post(chat))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Chat
// ============================================================

/// One chat exchange: validate the request and ask the engine for a
/// topic-scoped reply.
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    // Unreadable bodies map to the generic internal error, not a 400
    let Json(request) =
        payload.map_err(|_| AppError::Internal("An internal server error occurred".to_string()))?;

    if request.message.is_empty() || request.topic.is_empty() {
        return Err(AppError::BadRequest("Message or topic missing".to_string()));
    }

    let reply = state
        .engine
        .reply(&request.topic, &request.message)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, kind = ?e.kind, "Reply engine call failed");
            AppError::Internal("Failed to get response from AI model".to_string())
        })?;

    Ok(Json(ChatReply::response(reply)))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("topical ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ChatReply::error(message));
        (status, body).into_response()
    }
}
