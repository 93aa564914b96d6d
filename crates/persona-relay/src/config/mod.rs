pub mod settings;

pub use settings::{ApiKey, ConversationConfig, ProviderConfig, ServerConfig, Settings};
