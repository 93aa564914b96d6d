use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::MutexGuard;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use crate::models::chat::{ChatMessage, SessionId};
use super::types::ConversationState;

/// One session's state behind an async lock.
/// The lock is held across the provider call, so a session is served one request at a time.
pub struct SessionSlot {
    state: tokio::sync::Mutex<ConversationState>,
    last_seen: Mutex<Instant>,
}

impl SessionSlot {
    fn new() -> Self {
        Self {
            state: tokio::sync::Mutex::new(ConversationState::new()),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, ConversationState> {
        self.touch();
        self.state.lock().await
    }

    fn touch(&self) {
        *self.last_seen.lock() = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_seen.lock().elapsed()
    }
}

/// Thread-safe in-memory session map, bounded by session count (LRU) and idle time.
#[derive(Clone)]
pub struct ConversationCache {
    /// Session storage: session_id -> slot
    storage: Arc<DashMap<SessionId, Arc<SessionSlot>>>,
    max_sessions: usize,
    idle_ttl: Duration,
}

impl ConversationCache {
    pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
        info!(
            "Initializing conversation cache: max_sessions={}, idle_ttl={}s",
            max_sessions,
            idle_ttl.as_secs()
        );
        Self {
            storage: Arc::new(DashMap::new()),
            max_sessions: max_sessions.max(1),
            idle_ttl,
        }
    }

    /// Get the slot for `session_id`, creating it on first use.
    /// A new session at capacity evicts the least recently used idle one first.
    pub fn session(&self, session_id: &str) -> Arc<SessionSlot> {
        if let Some(slot) = self.storage.get(session_id) {
            slot.touch();
            return Arc::clone(slot.value());
        }

        if self.storage.len() >= self.max_sessions {
            self.evict_lru();
        }

        let slot = Arc::clone(
            self.storage
                .entry(session_id.to_string())
                .or_insert_with(|| {
                    debug!("Created session {}", session_id);
                    Arc::new(SessionSlot::new())
                })
                .value(),
        );
        slot.touch();
        slot
    }

    /// Copy of a session's history, without refreshing its activity time
    pub async fn snapshot(&self, session_id: &str) -> Option<Vec<ChatMessage>> {
        let slot = self.storage.get(session_id).map(|s| Arc::clone(s.value()))?;
        let state = slot.state.lock().await;
        Some(state.messages.clone())
    }

    pub fn contains(&self, session_id: &str) -> bool {
        self.storage.contains_key(session_id)
    }

    pub fn remove(&self, session_id: &str) -> bool {
        self.storage.remove(session_id).is_some()
    }

    /// Get number of active sessions
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Slots referenced outside the map are in use by a request
    fn is_idle(slot: &Arc<SessionSlot>) -> bool {
        Arc::strong_count(slot) == 1
    }

    fn evict_lru(&self) -> Option<SessionId> {
        let victim = self
            .storage
            .iter()
            .filter(|entry| Self::is_idle(entry.value()))
            .max_by_key(|entry| entry.value().idle_for())
            .map(|entry| entry.key().clone())?;

        let removed = self
            .storage
            .remove_if(&victim, |_, slot| Self::is_idle(slot))
            .is_some();

        if removed {
            debug!("Session cap reached, evicted least recently used session {}", victim);
            Some(victim)
        } else {
            None
        }
    }

    /// Drop sessions idle longer than the TTL.
    /// Returns number of sessions removed
    pub fn cleanup_expired(&self) -> usize {
        let start_len = self.storage.len();
        let ttl = self.idle_ttl;
        self.storage
            .retain(|_, slot| !Self::is_idle(slot) || slot.idle_for() <= ttl);
        let count = start_len.saturating_sub(self.storage.len());

        if count > 0 {
            info!("Cleaned up {} expired sessions", count);
        }

        count
    }

    /// Run [`cleanup_expired`](Self::cleanup_expired) every `period` on the runtime
    pub fn spawn_sweeper(&self, period: Duration) -> JoinHandle<()> {
        let cache = self.clone();
        let period = period.max(Duration::from_secs(1));

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                cache.cleanup_expired();
            }
        })
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            active_sessions: self.len(),
            max_sessions: self.max_sessions,
            idle_ttl_seconds: self.idle_ttl.as_secs(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub active_sessions: usize,
    pub max_sessions: usize,
    pub idle_ttl_seconds: u64,
}
