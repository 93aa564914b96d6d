use std::sync::Arc;
use axum::extract::FromRef;

use crate::services::ConversationRelay;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ConversationRelay>,
}

impl AppState {
    pub fn new(relay: Arc<ConversationRelay>) -> Self {
        Self { relay }
    }
}

impl FromRef<AppState> for Arc<ConversationRelay> {
    fn from_ref(state: &AppState) -> Self {
        state.relay.clone()
    }
}
