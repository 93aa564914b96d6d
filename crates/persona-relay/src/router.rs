use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::state::AppState;

/// Chat messages are short; anything bigger is not a chat message
const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/chat", post(handlers::chat::chat_handler))
        .with_state(state);

    // Avatar page, scripts and models
    let app = match static_dir {
        Some(dir) => api_routes.fallback_service(ServeDir::new(dir)),
        None => api_routes,
    };

    app
        // CORS (answers OPTIONS preflight directly)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE]),
        )
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
}
