use std::sync::Arc;

use crate::{
    models::{ChatMessage, ChatTranscript},
    storage::{KeyValueStore, Loaded, Saved, ScopedStore, CHAT_PREFIX},
};

/// Persisted chat transcript, one conversation per user
#[derive(Clone)]
pub struct ChatStore {
    scoped: ScopedStore,
}

impl ChatStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            scoped: ScopedStore::new(backend, CHAT_PREFIX),
        }
    }

    /// The user's conversation, or just the greeting when there is none
    pub fn load(&self, identity: Option<&str>) -> Loaded<ChatTranscript> {
        self.scoped.load(identity, ChatTranscript::greeting())
    }

    /// Adds `message` to the transcript and persists the whole conversation
    pub fn append(
        &self,
        identity: Option<&str>,
        transcript: &mut ChatTranscript,
        message: ChatMessage,
    ) -> Saved {
        transcript.push(message);
        self.scoped.save(identity, &*transcript)
    }

    pub fn key(&self, identity: Option<&str>) -> String {
        self.scoped.key(identity)
    }
}
