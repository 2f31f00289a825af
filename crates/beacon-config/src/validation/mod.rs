//! Full configuration validation.
//!
//! Collects every problem into a single `ConfigError` so a user can fix
//! the file in one pass.

mod helpers;


use crate::schema::BeaconConfig;
use beacon_common::ConfigError;

use helpers::validate_range;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &BeaconConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_chat(&mut errors, config);
    validate_storage(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_chat(errors: &mut Vec<String>, config: &BeaconConfig) {
    let chat = &config.chat;
    let url = chat.base_url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) || url.contains(char::is_whitespace) {
        errors.push(format!(
            "chat.base_url = {:?} must be an http:// or https:// URL",
            chat.base_url
        ));
    }
    validate_range(errors, "chat.request_timeout_secs", chat.request_timeout_secs, 1, 600);
    validate_range(errors, "chat.cooldown_secs", chat.cooldown_secs, 0, 3600);
    validate_range(errors, "chat.countdown_tick_ms", chat.countdown_tick_ms, 50, 10_000);
    validate_range(errors, "chat.max_input_chars", chat.max_input_chars, 1, 10_000);
    validate_range(errors, "chat.connect_timeout_secs", chat.connect_timeout_secs, 1, 120);
}

fn validate_storage(errors: &mut Vec<String>, config: &BeaconConfig) {
    let key = &config.storage.history_key;
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
    if !valid {
        errors.push(format!(
            "storage.history_key = {key:?} may only contain letters, digits, '_', '-' and '.'"
        ));
    }
}
