//! Single-flight request lifecycle.
//!
//! At most one ticket is active. Beginning a new one cancels the previous
//! ticket; a completion only counts if its token is still the active one.

#[cfg(test)]
mod tests;

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::transport::{AskRequest, AskTransport, TransportError};

/// Identifies one issued request. Tokens increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// How one ask ended, as seen by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    Success(String),
    HttpError { status: u16, detail: Option<String> },
    Timeout,
    Cancelled,
    NetworkError(String),
}

impl From<Result<String, TransportError>> for RequestOutcome {
    fn from(result: Result<String, TransportError>) -> Self {
        match result {
            Ok(reply) => Self::Success(reply),
            Err(TransportError::Http { status, detail }) => Self::HttpError { status, detail },
            Err(TransportError::Network(message)) => Self::NetworkError(message),
        }
    }
}

/// Handle for one issued request.
#[derive(Debug, Clone)]
pub struct Ticket {
    token: RequestToken,
    cancel: CancellationToken,
}

impl Ticket {
    pub fn token(&self) -> RequestToken {
        self.token
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

pub struct RequestManager {
    transport: Arc<dyn AskTransport>,
    timeout: Duration,
    next_token: u64,
    active: Option<Ticket>,
}

impl RequestManager {
    pub fn new(transport: Arc<dyn AskTransport>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            next_token: 1,
            active: None,
        }
    }

    /// Cancel whatever is outstanding and make a fresh ticket active.
    pub fn begin(&mut self) -> Ticket {
        if let Some(previous) = self.active.take() {
            debug!(token = %previous.token, "superseding outstanding request");
            previous.cancel.cancel();
        }

        let ticket = Ticket {
            token: RequestToken(self.next_token),
            cancel: CancellationToken::new(),
        };
        self.next_token += 1;
        self.active = Some(ticket.clone());
        ticket
    }

    /// Cancel the active ticket, if any, and return its token.
    pub fn cancel(&mut self) -> Option<RequestToken> {
        let ticket = self.active.take()?;
        ticket.cancel.cancel();
        debug!(token = %ticket.token, "request cancelled");
        Some(ticket.token)
    }

    pub fn active(&self) -> Option<RequestToken> {
        self.active.as_ref().map(|t| t.token)
    }

    pub fn is_active(&self, token: RequestToken) -> bool {
        self.active() == Some(token)
    }

    /// Retire `token` if it is still the active one.
    ///
    /// Returns `false` for a stale token; its result must be discarded.
    pub fn finish(&mut self, token: RequestToken) -> bool {
        if !self.is_active(token) {
            return false;
        }
        self.active = None;
        true
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the future that performs the ask for `ticket`.
    ///
    /// The future owns everything it needs, so it can be awaited after the
    /// caller has released any lock around the manager.
    pub fn issue(
        &self,
        ticket: &Ticket,
        request: AskRequest,
    ) -> impl Future<Output = RequestOutcome> + Send + 'static {
        let transport = Arc::clone(&self.transport);
        let cancel = ticket.cancel.clone();
        let timeout = self.timeout;
        let token = ticket.token;

        async move {
            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => RequestOutcome::Cancelled,
                result = tokio::time::timeout(timeout, transport.ask(&request)) => match result {
                    Ok(result) => result.into(),
                    Err(_) => {
                        cancel.cancel();
                        RequestOutcome::Timeout
                    }
                },
            };
            debug!(%token, ?outcome, "request settled");
            outcome
        }
    }
}

impl fmt::Debug for RequestManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestManager")
            .field("timeout", &self.timeout)
            .field("next_token", &self.next_token)
            .field("active", &self.active())
            .finish_non_exhaustive()
    }
}
