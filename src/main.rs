//! Topical reply server
//!
//! Serves the chat exchange endpoint backed by Gemini.

use std::net::SocketAddr;
use std::sync::Arc;
use topical::api::{create_router, AppState};
use topical::llm::{GeminiConfig, GeminiEngine, LoggingEngine};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "topical=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("TOPICAL_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let Some(config) = GeminiConfig::from_env() else {
        tracing::error!("GEMINI_API_KEY not found in environment variables.");
        std::process::exit(1);
    };

    tracing::info!(model = %config.model, "Reply engine initialized");
    let engine = Arc::new(LoggingEngine::new(Arc::new(GeminiEngine::new(config))));

    // Create application state
    let state = AppState::new(engine);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Topical reply server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
