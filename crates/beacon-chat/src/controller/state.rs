//! Session state, published snapshots and user-facing failure text.

use tokio::time::Instant;

use crate::cooldown::CooldownGate;
use crate::request::{RequestManager, RequestOutcome};
use crate::Message;

pub(crate) const TIMEOUT_TEXT: &str = "Request timeout. Please try again.";

/// Read model handed to the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub messages: Vec<Message>,
    pub loading: bool,
    pub error: Option<String>,
    pub cooldown_remaining: u64,
}

impl ChatSnapshot {
    /// Whether the input should accept a new send right now.
    pub fn can_send(&self) -> bool {
        !self.loading && self.cooldown_remaining == 0
    }
}

/// Result of one `send_message` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing happened.
    Ignored,
    /// Rejected by the cooldown gate before any network call.
    RateLimited { remaining_seconds: u64 },
    /// The request settled while still active and its result was applied.
    Completed(RequestOutcome),
    /// Cancelled or superseded; the result was dropped.
    Discarded,
}

impl SendOutcome {
    /// User-facing text for outcomes that leave nothing in the log.
    pub fn notice(&self) -> Option<String> {
        match self {
            SendOutcome::RateLimited { remaining_seconds } => Some(wait_text(*remaining_seconds)),
            _ => None,
        }
    }
}

pub(crate) struct SessionState {
    pub(crate) messages: Vec<Message>,
    pub(crate) loading: bool,
    pub(crate) error: Option<String>,
    pub(crate) gate: CooldownGate,
    pub(crate) requests: RequestManager,
    pub(crate) countdown_running: bool,
}

impl SessionState {
    pub(crate) fn snapshot(&self, now: Instant) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.messages.clone(),
            loading: self.loading,
            error: self.error.clone(),
            cooldown_remaining: self.gate.remaining_seconds(now),
        }
    }
}

pub(crate) fn wait_text(remaining_seconds: u64) -> String {
    format!("Please wait {remaining_seconds}s before sending another message.")
}

/// The assistant-side message recorded for a failed outcome.
pub(crate) fn failure_message(outcome: &RequestOutcome) -> Option<Message> {
    let content = match outcome {
        RequestOutcome::Success(_) | RequestOutcome::Cancelled => return None,
        RequestOutcome::HttpError {
            detail: Some(detail),
            ..
        } => format!("❌ {detail}"),
        RequestOutcome::HttpError { status, .. } => format!("❌ HTTP {status}"),
        RequestOutcome::Timeout => format!("⏱️ {TIMEOUT_TEXT}"),
        RequestOutcome::NetworkError(message) => format!("⚠️ {message}"),
    };
    Some(Message::assistant_error(content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_text_per_outcome() {
        let text = |outcome: RequestOutcome| failure_message(&outcome).map(|m| m.content);

        assert_eq!(
            text(RequestOutcome::HttpError {
                status: 402,
                detail: Some("OpenAI API quota exceeded.".into())
            }),
            Some("❌ OpenAI API quota exceeded.".into())
        );
        assert_eq!(
            text(RequestOutcome::HttpError {
                status: 503,
                detail: None
            }),
            Some("❌ HTTP 503".into())
        );
        assert_eq!(
            text(RequestOutcome::Timeout),
            Some("⏱️ Request timeout. Please try again.".into())
        );
        assert_eq!(
            text(RequestOutcome::NetworkError("empty response".into())),
            Some("⚠️ empty response".into())
        );
        assert_eq!(text(RequestOutcome::Success("ok".into())), None);
        assert_eq!(text(RequestOutcome::Cancelled), None);
    }

    #[test]
    fn failure_messages_are_flagged() {
        let msg = failure_message(&RequestOutcome::Timeout).unwrap();
        assert!(msg.is_error);
        assert_eq!(msg.role, crate::Role::Assistant);
    }

    #[test]
    fn only_rate_limit_carries_a_notice() {
        assert_eq!(
            SendOutcome::RateLimited { remaining_seconds: 7 }.notice().as_deref(),
            Some("Please wait 7s before sending another message.")
        );
        assert_eq!(SendOutcome::Ignored.notice(), None);
        assert_eq!(SendOutcome::Discarded.notice(), None);
        assert_eq!(
            SendOutcome::Completed(RequestOutcome::Timeout).notice(),
            None
        );
    }

    #[test]
    fn wait_text_names_seconds() {
        assert_eq!(
            wait_text(10),
            "Please wait 10s before sending another message."
        );
    }

    #[test]
    fn can_send_requires_idle_and_no_cooldown() {
        let idle = ChatSnapshot::default();
        assert!(idle.can_send());
        assert!(!ChatSnapshot {
            loading: true,
            ..ChatSnapshot::default()
        }
        .can_send());
        assert!(!ChatSnapshot {
            cooldown_remaining: 3,
            ..ChatSnapshot::default()
        }
        .can_send());
    }
}
