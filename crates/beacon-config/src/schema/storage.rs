//! History persistence configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where and whether chat history is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Persist history across restarts. When false the log lives in memory.
    pub persist: bool,
    /// Slot name; also the file stem inside `directory`.
    pub history_key: String,
    /// Override for the history directory (default: `<data_dir>/beacon`).
    pub directory: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist: true,
            history_key: "chatHistory".into(),
            directory: None,
        }
    }
}
