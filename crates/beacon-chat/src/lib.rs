//! Assistant chat session for the Beacon dashboard.
//!
//! Owns one conversation against the backend `ask` endpoint:
//! - Durable message history behind an injectable key-value slot
//! - Client-side cooldown between sends
//! - Single-flight requests with supersession, cancellation and timeout
//! - A session controller publishing snapshots for the presentation layer

pub mod controller;
pub mod cooldown;
pub mod request;
pub mod settings;
pub mod store;
pub mod transport;

#[cfg(test)]
mod testing;

use serde::{Deserialize, Serialize};

pub use controller::{ChatController, ChatSnapshot, SendOutcome};
pub use cooldown::{Acquire, CooldownGate};
pub use request::{RequestManager, RequestOutcome, RequestToken, Ticket};
pub use settings::ChatSettings;
pub use store::{FileStore, HistoryStore, KeyValueStore, MemoryStore, HISTORY_KEY};
pub use transport::{AskRequest, AskTransport, HttpTransport, TransportError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the conversation. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Set when `content` describes a failed attempt rather than a reply.
    #[serde(
        rename = "isError",
        default,
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub is_error: bool,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            is_error: false,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            is_error: false,
        }
    }

    pub fn assistant_error(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            is_error: true,
        }
    }
}

/// Context entry sent to the remote service (no error flag).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub content: String,
}

impl From<&Message> for HistoryEntry {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
        }
    }
}
