//! Beacon configuration.
//!
//! TOML file at the platform config path, environment overrides on top,
//! then validation. Every section has defaults so partial files work.
//!
//! ```rust,no_run
//! let config = beacon_config::load_config().expect("failed to load config");
//! println!("{}", config.chat.base_url);
//! ```

pub mod env;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use env::{apply_env_overrides, API_URL_VAR, LOG_LEVEL_VAR};
pub use schema::{BeaconConfig, ChatConfig, LogLevel, LoggingConfig, StorageConfig, CONFIG_SCHEMA_VERSION};
pub use toml_loader::{load_default, load_from_path};
pub use validation::validate;

use beacon_common::ConfigError;
use std::path::Path;

/// Load config from the platform default path, apply environment
/// overrides and validate the result.
pub fn load_config() -> Result<BeaconConfig, ConfigError> {
    finish(toml_loader::load_default()?)
}

/// Like [`load_config`] but reads an explicit file, which must exist.
pub fn load_config_from(path: &Path) -> Result<BeaconConfig, ConfigError> {
    finish(toml_loader::load_from_path(path)?)
}

fn finish(mut config: BeaconConfig) -> Result<BeaconConfig, ConfigError> {
    apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}
