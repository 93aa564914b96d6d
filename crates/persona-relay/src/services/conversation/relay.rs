use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::ConversationConfig;
use crate::models::chat::{ChatMessage, SessionId};
use crate::persona::Persona;
use crate::utils::error::{ProviderError, RelayError};

use super::cache::ConversationCache;

/// Trait for the completion provider
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Single non-streaming completion for `messages` (system prompt first)
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyMode {
    /// Reply produced by the provider and recorded in history
    Live,
    /// No credential configured; canned persona line, history untouched
    Offline,
}

#[derive(Debug, Clone)]
pub struct RelayReply {
    pub message: ChatMessage,
    pub mode: ReplyMode,
}

impl RelayReply {
    fn live(content: String) -> Self {
        Self { message: ChatMessage::assistant(content), mode: ReplyMode::Live }
    }

    fn offline(content: &str) -> Self {
        Self { message: ChatMessage::assistant(content), mode: ReplyMode::Offline }
    }

    pub fn content(&self) -> &str {
        &self.message.content
    }
}

pub struct ConversationRelay {
    cache: ConversationCache,
    llm_provider: Option<Box<dyn LlmProvider>>,
    persona: Persona,
    max_turns: usize,
    default_session_id: SessionId,
}

impl ConversationRelay {
    /// `llm_provider` is `None` when no credential is configured (offline mode)
    pub fn new(
        llm_provider: Option<Box<dyn LlmProvider>>,
        persona: Persona,
        config: &ConversationConfig,
    ) -> Self {
        Self {
            cache: ConversationCache::new(
                config.max_sessions,
                Duration::from_secs(config.idle_ttl_seconds),
            ),
            llm_provider,
            persona,
            max_turns: config.max_turns.max(1),
            default_session_id: config.default_session_id.clone(),
        }
    }

    pub fn cache(&self) -> &ConversationCache {
        &self.cache
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn is_provider_configured(&self) -> bool {
        self.llm_provider.is_some()
    }

    fn resolve_session_id(&self, session_id: Option<&str>) -> SessionId {
        match session_id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => self.default_session_id.clone(),
        }
    }

    /// Relay one user message and return the assistant's reply.
    ///
    /// The session's history is locked for the whole exchange: user turn is appended and
    /// bounded, the provider is called with system prompt + history, and on success the
    /// reply is appended and bounded again. On provider failure the user turn stays and
    /// no assistant turn is recorded.
    pub async fn handle_message(
        &self,
        session_id: Option<&str>,
        message: Option<&str>,
    ) -> Result<RelayReply, RelayError> {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(RelayError::InvalidRequest("Message is required".to_string())),
        };
        let session_id = self.resolve_session_id(session_id);

        let Some(provider) = self.llm_provider.as_deref() else {
            debug!("No provider configured, offline reply for session {}", session_id);
            return Ok(RelayReply::offline(self.persona.offline_line()));
        };

        let slot = self.cache.session(&session_id);
        let mut state = slot.lock().await;

        state.push(ChatMessage::user(message), self.max_turns);
        let messages = self.build_messages(&state.messages);

        let start_time = Instant::now();
        match provider.generate(&messages).await {
            Ok(reply) => {
                state.push(ChatMessage::assistant(reply.clone()), self.max_turns);
                state.metadata.completed_exchanges += 1;
                info!(
                    "Session {} replied in {}ms (history={}, exchanges={})",
                    session_id,
                    start_time.elapsed().as_millis(),
                    state.messages.len(),
                    state.metadata.completed_exchanges
                );
                Ok(RelayReply::live(reply))
            }
            Err(e) => {
                warn!(
                    "Provider call failed for session {} after {}ms: {}",
                    session_id,
                    start_time.elapsed().as_millis(),
                    e
                );
                Err(e.into())
            }
        }
    }

    /// System prompt followed by the bounded history, in order
    fn build_messages(&self, history: &[ChatMessage]) -> Vec<ChatMessage> {
        std::iter::once(ChatMessage::system(self.persona.system_prompt()))
            .chain(history.iter().cloned())
            .collect()
    }

    /// Persona line to show when a provider call failed
    pub fn failure_line(&self) -> &'static str {
        self.persona.failure_line()
    }

    /// Snapshot of a session's stored turns
    pub async fn history(&self, session_id: Option<&str>) -> Option<Vec<ChatMessage>> {
        let session_id = self.resolve_session_id(session_id);
        self.cache.snapshot(&session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::Role;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn config() -> ConversationConfig {
        ConversationConfig::default()
    }

    fn relay_with(provider: MockLlmProvider) -> ConversationRelay {
        ConversationRelay::new(Some(Box::new(provider)), Persona::default(), &config())
    }

    /// Replies after a delay, echoing the last user message
    struct SlowEcho {
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait::async_trait]
    impl LlmProvider for SlowEcho {
        async fn generate(&self, messages: &[ChatMessage]) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
            Ok(format!("echo: {}", last))
        }
    }

    #[tokio::test]
    async fn test_round_trip_records_both_turns() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_generate()
            .withf(|messages| {
                messages.len() == 2
                    && messages[0].role == Role::System
                    && messages[1] == ChatMessage::user("yo what's the deal with gas fees")
            })
            .times(1)
            .returning(|_| Ok("we don't pay that out here, fractions of a cent fam".to_string()));
        let relay = relay_with(provider);

        let reply = relay
            .handle_message(Some("s1"), Some("yo what's the deal with gas fees"))
            .await
            .unwrap();

        assert_eq!(reply.mode, ReplyMode::Live);
        assert_eq!(reply.content(), "we don't pay that out here, fractions of a cent fam");
        assert_eq!(
            relay.history(Some("s1")).await.unwrap(),
            vec![
                ChatMessage::user("yo what's the deal with gas fees"),
                ChatMessage::assistant("we don't pay that out here, fractions of a cent fam"),
            ]
        );
    }

    #[tokio::test]
    async fn test_history_length_is_min_of_two_n_and_window() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_generate()
            .returning(|messages| Ok(format!("re: {}", messages.last().unwrap().content)));
        let relay = relay_with(provider);

        for n in 1..=15usize {
            relay
                .handle_message(Some("s"), Some(&format!("msg {}", n)))
                .await
                .unwrap();
            let history = relay.history(Some("s")).await.unwrap();
            assert_eq!(history.len(), (2 * n).min(20));
        }

        let history = relay.history(Some("s")).await.unwrap();
        assert_eq!(history[0], ChatMessage::user("msg 6"));
        assert_eq!(history[19], ChatMessage::assistant("re: msg 15"));
    }

    #[tokio::test]
    async fn test_provider_sees_bounded_history() {
        let mut provider = MockLlmProvider::new();
        // system prompt + at most 20 turns
        provider
            .expect_generate()
            .withf(|messages| messages.len() <= 21)
            .returning(|_| Ok("ok".to_string()));
        let relay = relay_with(provider);

        for _ in 0..12 {
            relay.handle_message(None, Some("again")).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_empty_message_is_rejected_without_side_effects() {
        let mut provider = MockLlmProvider::new();
        provider.expect_generate().times(0);
        let relay = relay_with(provider);

        for message in [None, Some(""), Some("   ")] {
            let err = relay.handle_message(Some("s"), message).await.unwrap_err();
            assert!(matches!(err, RelayError::InvalidRequest(_)));
        }
        assert!(relay.history(Some("s")).await.is_none());
        assert!(relay.cache().is_empty());
    }

    #[tokio::test]
    async fn test_offline_mode_uses_offline_lines_and_keeps_no_history() {
        let relay = ConversationRelay::new(None, Persona::default(), &config());

        for _ in 0..20 {
            let reply = relay.handle_message(Some("s"), Some("gm")).await.unwrap();
            assert_eq!(reply.mode, ReplyMode::Offline);
            assert!(Persona::default().offline_lines().contains(&reply.content()));
        }
        assert!(relay.history(Some("s")).await.is_none());
        assert!(!relay.is_provider_configured());
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_user_turn_only() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_generate()
            .returning(|_| Err(ProviderError::Api("invalid api key".to_string())));
        let relay = relay_with(provider);

        let err = relay.handle_message(Some("s"), Some("hello")).await.unwrap_err();
        assert!(matches!(err, RelayError::Provider(ProviderError::Api(_))));
        assert_eq!(
            relay.history(Some("s")).await.unwrap(),
            vec![ChatMessage::user("hello")]
        );
    }

    #[tokio::test]
    async fn test_missing_session_uses_default_key() {
        let mut provider = MockLlmProvider::new();
        provider.expect_generate().returning(|_| Ok("sup".to_string()));
        let relay = relay_with(provider);

        relay.handle_message(None, Some("a")).await.unwrap();
        relay.handle_message(Some(""), Some("b")).await.unwrap();

        let history = relay.history(Some("default")).await.unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(relay.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let mut provider = MockLlmProvider::new();
        provider
            .expect_generate()
            .returning(|messages| Ok(format!("{} turns seen", messages.len() - 1)));
        let relay = relay_with(provider);

        relay.handle_message(Some("alice"), Some("one")).await.unwrap();
        relay.handle_message(Some("alice"), Some("two")).await.unwrap();
        let reply = relay.handle_message(Some("bob"), Some("first")).await.unwrap();

        assert_eq!(reply.content(), "1 turns seen");
        let bob = relay.history(Some("bob")).await.unwrap();
        assert!(bob.iter().all(|m| m.content != "one" && m.content != "two"));
        assert_eq!(relay.history(Some("alice")).await.unwrap().len(), 4);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_messages_on_one_session_are_serialized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = SlowEcho { delay: Duration::from_millis(50), calls: calls.clone() };
        let relay = Arc::new(ConversationRelay::new(
            Some(Box::new(provider)),
            Persona::default(),
            &config(),
        ));

        let a = {
            let relay = relay.clone();
            tokio::spawn(async move { relay.handle_message(Some("shared"), Some("first")).await })
        };
        let b = {
            let relay = relay.clone();
            tokio::spawn(async move { relay.handle_message(Some("shared"), Some("second")).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        let history = relay.history(Some("shared")).await.unwrap();
        assert_eq!(history.len(), 4);
        for pair in history.chunks(2) {
            assert_eq!(pair[0].role, Role::User);
            assert_eq!(pair[1].role, Role::Assistant);
            assert_eq!(pair[1].content, format!("echo: {}", pair[0].content));
        }
    }
}
