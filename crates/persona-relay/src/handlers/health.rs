use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::services::ConversationRelay;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    persona: String,
    provider: String,
    active_sessions: usize,
    max_sessions: usize,
}

pub async fn health_check(
    State(relay): State<Arc<ConversationRelay>>,
) -> (StatusCode, Json<HealthResponse>) {
    let provider = if relay.is_provider_configured() { "configured" } else { "offline" };
    let stats = relay.cache().stats();

    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            persona: relay.persona().name().to_string(),
            provider: provider.to_string(),
            active_sessions: stats.active_sessions,
            max_sessions: stats.max_sessions,
        }),
    )
}
