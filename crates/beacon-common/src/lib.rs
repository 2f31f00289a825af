pub mod errors;

pub use errors::{BeaconError, ConfigError, StorageError};

pub type Result<T> = std::result::Result<T, BeaconError>;
