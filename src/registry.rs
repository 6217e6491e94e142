//! Topic registry
//!
//! Maps each topic to its live conversation. Entries are created by
//! `reset` and live until the process exits or the topic is reset again.
//!
//! Each conversation sits behind its own async mutex, so at most one
//! exchange per topic is in flight and turns cannot interleave. The map
//! lock itself is only held for lookups and inserts, never across a
//! remote call, so a slow topic does not block the others.

use crate::conversation::Conversation;
use crate::llm::{LlmService, Turn};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub type ConversationHandle = Arc<Mutex<Conversation>>;

pub struct TopicRegistry {
    service: Option<Arc<dyn LlmService>>,
    conversations: RwLock<HashMap<String, ConversationHandle>>,
}

impl TopicRegistry {
    /// `service == None` makes every conversation unconfigured
    pub fn new(service: Option<Arc<dyn LlmService>>) -> Self {
        Self {
            service,
            conversations: RwLock::new(HashMap::new()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.service.is_some()
    }

    /// Install a brand-new conversation for `topic`, discarding any
    /// previous one.
    ///
    /// The returned handle is already in the map. An exchange still
    /// running on the discarded conversation finishes, but its turns are
    /// no longer reachable through the registry.
    pub async fn reset(&self, topic: &str) -> ConversationHandle {
        let handle = Arc::new(Mutex::new(Conversation::new(topic, self.service.clone())));
        let previous = self
            .conversations
            .write()
            .await
            .insert(topic.to_string(), handle.clone());

        tracing::debug!(topic = %topic, replaced = previous.is_some(), "Conversation reset");
        handle
    }

    /// Look up an existing conversation
    pub async fn get(&self, topic: &str) -> Option<ConversationHandle> {
        self.conversations.read().await.get(topic).cloned()
    }

    /// All known topics, sorted
    pub async fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.conversations.read().await.keys().cloned().collect();
        topics.sort();
        topics
    }

    /// Snapshot of a topic's transcript; empty for unknown topics.
    ///
    /// Waits for any in-flight exchange on the topic to finish.
    pub async fn history(&self, topic: &str) -> Vec<Turn> {
        match self.get(topic).await {
            Some(handle) => handle.lock().await.transcript().to_vec(),
            None => Vec::new(),
        }
    }
}
