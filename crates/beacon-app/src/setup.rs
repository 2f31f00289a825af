//! Wiring from loaded configuration to the chat session.

use std::sync::Arc;

use beacon_chat::{ChatSettings, FileStore, HistoryStore, KeyValueStore, MemoryStore};
use beacon_common::{BeaconError, ConfigError};
use beacon_config::{BeaconConfig, ChatConfig};
use tracing::info;

use crate::cli::Args;

/// Load the config file named on the command line, or the default one,
/// then fold in command-line overrides.
pub fn load_config(args: &Args) -> Result<BeaconConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => beacon_config::load_config_from(path)?,
        None => beacon_config::load_config()?,
    };
    if let Some(url) = &args.base_url {
        config.chat.base_url = url.clone();
        beacon_config::validate(&config)?;
    }
    Ok(config)
}

pub fn chat_settings(chat: &ChatConfig) -> ChatSettings {
    ChatSettings::default()
        .with_base_url(chat.base_url.clone())
        .with_request_timeout(chat.request_timeout())
        .with_cooldown(chat.cooldown())
        .with_countdown_tick(chat.countdown_tick())
        .with_connect_timeout(chat.connect_timeout())
}

/// Pick the history backend: memory when asked for, otherwise a file slot
/// under the flag, configured or platform data directory.
pub fn history_store(args: &Args, config: &BeaconConfig) -> Result<HistoryStore, BeaconError> {
    let storage = &config.storage;
    let backend: Arc<dyn KeyValueStore> = if args.in_memory || !storage.persist {
        info!("history kept in memory");
        Arc::new(MemoryStore::new())
    } else {
        let dir = match args.history_dir.clone().or_else(|| storage.directory.clone()) {
            Some(dir) => dir,
            None => FileStore::default_dir()?,
        };
        info!(dir = %dir.display(), "history persisted to disk");
        Arc::new(FileStore::new(dir))
    };
    Ok(HistoryStore::new(backend).with_key(storage.history_key.clone()))
}
