//! Assistant chat configuration types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Assistant chat settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Backend origin (valid: http:// or https:// URL).
    pub base_url: String,
    /// Seconds before an ask is abandoned (valid range: 1-600).
    pub request_timeout_secs: u32,
    /// Minimum seconds between sends (valid range: 0-3600).
    pub cooldown_secs: u32,
    /// Countdown refresh cadence in milliseconds (valid range: 50-10000).
    pub countdown_tick_ms: u32,
    /// Longest accepted input, in characters (valid range: 1-10000).
    pub max_input_chars: u32,
    /// Seconds to wait for a TCP connection (valid range: 1-120).
    pub connect_timeout_secs: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".into(),
            request_timeout_secs: 45,
            cooldown_secs: 15,
            countdown_tick_ms: 500,
            max_input_chars: 250,
            connect_timeout_secs: 10,
        }
    }
}

impl ChatConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.request_timeout_secs))
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(u64::from(self.cooldown_secs))
    }

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(u64::from(self.countdown_tick_ms))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.connect_timeout_secs))
    }
}
