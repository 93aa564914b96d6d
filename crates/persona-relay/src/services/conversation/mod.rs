//! Conversation relay module
//!
//! Provides in-memory conversation state management with:
//! - Thread-safe session cache (DashMap) bounded by LRU capacity and idle TTL
//! - Per-session serialized exchanges
//! - Sliding window history replayed to the completion provider

mod cache;
pub mod relay;
pub mod types;

pub use cache::{CacheStats, ConversationCache, SessionSlot};
pub use relay::{ConversationRelay, LlmProvider, RelayReply, ReplyMode};
pub use types::{ConversationMetadata, ConversationState};

pub use crate::models::chat::{ChatMessage, SessionId};
