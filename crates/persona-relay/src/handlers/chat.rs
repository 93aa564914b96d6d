use crate::models::chat::{ChatRequest, ChatResponse};
use crate::services::conversation::{ConversationRelay, ReplyMode};
use crate::utils::error::{ApiError, RelayError};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// `POST /api/chat`
///
/// Always answers in character: provider failures degrade to a persona failure line.
/// Only malformed requests (400) surface as errors.
pub async fn chat_handler(
    State(relay): State<Arc<ConversationRelay>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let start_time = Instant::now();
    info!(
        "Chat request: session={}, message_len={}",
        request.session_id.as_deref().unwrap_or("<default>"),
        request.message.as_deref().map(str::len).unwrap_or(0)
    );

    let result = relay
        .handle_message(request.session_id.as_deref(), request.message.as_deref())
        .await;

    match result {
        Ok(reply) => {
            info!("Chat completed in {}ms ({:?})", start_time.elapsed().as_millis(), reply.mode);
            let content = reply.message.content;
            Ok(Json(match reply.mode {
                ReplyMode::Live => ChatResponse::reply(content),
                ReplyMode::Offline => ChatResponse::offline(content),
            }))
        }
        Err(RelayError::Provider(e)) => {
            error!("Chat error: {}", e);
            Ok(Json(ChatResponse::reply(relay.failure_line())))
        }
        Err(e) => Err(e.into()),
    }
}
