//! Environment variable overrides applied on top of the TOML file.

use tracing::debug;

use crate::schema::{BeaconConfig, LogLevel};

/// Backend origin override.
pub const API_URL_VAR: &str = "BEACON_API_URL";
/// Log level override (`trace`..`error`).
pub const LOG_LEVEL_VAR: &str = "BEACON_LOG_LEVEL";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut BeaconConfig) {
    apply_overrides_with(config, |name| std::env::var(name).ok());
}

/// Apply overrides using `lookup` to read variables.
pub fn apply_overrides_with<F>(config: &mut BeaconConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
        debug!(var = API_URL_VAR, "overriding chat.base_url");
        config.chat.base_url = url.trim().to_string();
    }

    if let Some(raw) = lookup(LOG_LEVEL_VAR) {
        match parse_level(&raw) {
            Some(level) => config.logging.level = level,
            None => tracing::warn!(var = LOG_LEVEL_VAR, value = %raw, "ignoring unknown log level"),
        }
    }
}

fn parse_level(raw: &str) -> Option<LogLevel> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LogLevel::Trace),
        "debug" => Some(LogLevel::Debug),
        "info" => Some(LogLevel::Info),
        "warn" | "warning" => Some(LogLevel::Warn),
        "error" => Some(LogLevel::Error),
        _ => None,
    }
}
