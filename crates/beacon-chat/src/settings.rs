//! Runtime settings for the chat session.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(45);
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(15);
pub const DEFAULT_COUNTDOWN_TICK: Duration = Duration::from_millis(500);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSettings {
    /// Backend origin; the ask path is appended to it.
    pub base_url: String,
    /// Hard limit for one ask, measured from issue.
    pub request_timeout: Duration,
    /// Minimum interval between accepted sends.
    pub cooldown: Duration,
    /// Cadence of the cosmetic countdown republish.
    pub countdown_tick: Duration,
    pub connect_timeout: Duration,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cooldown: DEFAULT_COOLDOWN,
            countdown_tick: DEFAULT_COUNTDOWN_TICK,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl ChatSettings {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn with_countdown_tick(mut self, tick: Duration) -> Self {
        self.countdown_tick = tick;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_behaviour() {
        let settings = ChatSettings::default();
        assert_eq!(settings.base_url, "http://localhost:8000");
        assert_eq!(settings.request_timeout, Duration::from_secs(45));
        assert_eq!(settings.cooldown, Duration::from_secs(15));
        assert_eq!(settings.countdown_tick, Duration::from_millis(500));
    }

    #[test]
    fn builder_overrides() {
        let settings = ChatSettings::default()
            .with_base_url("https://beacon.internal")
            .with_cooldown(Duration::ZERO)
            .with_request_timeout(Duration::from_secs(5));
        assert_eq!(settings.base_url, "https://beacon.internal");
        assert!(settings.cooldown.is_zero());
        assert_eq!(settings.request_timeout, Duration::from_secs(5));
        assert_eq!(settings.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }
}
