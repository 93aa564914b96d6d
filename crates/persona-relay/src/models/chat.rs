use serde::{Deserialize, Serialize};

/// Opaque caller-supplied conversation key
pub type SessionId = String;

// ===== CONVERSATION MODELS =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message as sent to the provider. Session history only ever holds
/// `User` and `Assistant` entries; the system prompt is prepended per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

// ===== REQUEST MODELS =====

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "sessionId", alias = "session_id")]
    pub session_id: Option<String>,
}

// ===== RESPONSE MODELS =====

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

pub const OFFLINE_NOTE: &str =
    "Add OPENAI_API_KEY to the environment or .env for real AI responses";

impl ChatResponse {
    pub fn reply(response: impl Into<String>) -> Self {
        Self { response: response.into(), note: None }
    }

    pub fn offline(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            note: Some(OFFLINE_NOTE.to_string()),
        }
    }
}
