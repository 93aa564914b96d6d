use crate::models::chat::ChatMessage;

/// Per-session conversation state stored in the cache
#[derive(Debug, Clone)]
pub struct ConversationState {
    /// Chronological user/assistant turns, replayed verbatim to the provider
    pub messages: Vec<ChatMessage>,

    pub metadata: ConversationMetadata,
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            metadata: ConversationMetadata::default(),
        }
    }

    /// Append a turn, then drop the oldest turns until at most `max_turns` remain.
    /// The turn just appended always survives.
    pub fn push(&mut self, message: ChatMessage, max_turns: usize) {
        self.messages.push(message);

        let max_turns = max_turns.max(1);
        if self.messages.len() > max_turns {
            let excess = self.messages.len() - max_turns;
            self.messages.drain(..excess);
        }
    }
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for monitoring
#[derive(Debug, Clone, Default)]
pub struct ConversationMetadata {
    /// Provider round trips that produced a reply
    pub completed_exchanges: usize,
}
