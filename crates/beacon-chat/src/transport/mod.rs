//! The remote `ask` endpoint, behind a trait so the session can be
//! driven by a fake in tests.

mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{HistoryEntry, Message};

pub use http::{HttpTransport, ASK_PATH};

/// Body of `POST /api/chat/ask`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
    pub history: Vec<HistoryEntry>,
}

impl AskRequest {
    /// Build a request from the new text and everything said before it.
    pub fn new(message: impl Into<String>, prior: &[Message]) -> Self {
        Self {
            message: message.into(),
            history: prior.iter().map(HistoryEntry::from).collect(),
        }
    }
}

/// Transport-level failure of one ask.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP {status}")]
    Http { status: u16, detail: Option<String> },
    #[error("network error: {0}")]
    Network(String),
}

#[async_trait]
pub trait AskTransport: Send + Sync {
    /// Send one ask and return the non-empty reply text.
    async fn ask(&self, request: &AskRequest) -> Result<String, TransportError>;
}
