//! Durable chat history.
//!
//! The history lives in a single slot of a [`KeyValueStore`]. The
//! [`HistoryStore`] on top of it never fails: storage and JSON errors are
//! logged and the session carries on in memory.

mod file;
mod memory;


use std::sync::Arc;

use beacon_common::StorageError;
use tracing::warn;

use crate::Message;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Slot key the dashboard has always used.
pub const HISTORY_KEY: &str = "chatHistory";

/// A durable string slot keyed by name.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct HistoryStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl HistoryStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            key: HISTORY_KEY.to_string(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the persisted log. Absent or corrupt slots read as empty.
    pub fn load(&self) -> Vec<Message> {
        match self.try_load() {
            Ok(messages) => messages,
            Err(e) => {
                warn!(key = %self.key, "failed to load chat history: {e}");
                Vec::new()
            }
        }
    }

    pub fn try_load(&self) -> Result<Vec<Message>, StorageError> {
        match self.backend.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Persist the full log, replacing what was stored.
    pub fn save(&self, messages: &[Message]) {
        if let Err(e) = self.try_save(messages) {
            warn!(key = %self.key, count = messages.len(), "failed to save chat history: {e}");
        }
    }

    pub fn try_save(&self, messages: &[Message]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(messages)?;
        self.backend.set(&self.key, &raw)
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(&self.key) {
            warn!(key = %self.key, "failed to clear chat history: {e}");
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
