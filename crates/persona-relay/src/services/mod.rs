pub mod conversation;
pub mod llm_service;

pub use conversation::{ConversationRelay, LlmProvider};
pub use llm_service::LlmService;
