//! Scripted transport shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::transport::{AskRequest, AskTransport, TransportError};

type Reply = Result<String, TransportError>;

struct PendingCall {
    request: AskRequest,
    reply: Option<oneshot::Sender<Reply>>,
}

/// Answers from a queue when one is scripted, otherwise parks the call
/// until the test resolves it (or forever, for timeout tests).
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    queued: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<PendingCall>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
        let transport = Self::new();
        transport.queued.lock().unwrap().extend(replies);
        transport
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn request(&self, index: usize) -> AskRequest {
        self.calls.lock().unwrap()[index].request.clone()
    }

    /// Complete parked call `index`. Returns `false` if the caller already
    /// went away (cancelled, superseded or timed out).
    pub(crate) fn resolve(&self, index: usize, reply: Reply) -> bool {
        let sender = self.calls.lock().unwrap()[index].reply.take();
        match sender {
            Some(sender) => sender.send(reply).is_ok(),
            None => false,
        }
    }

    /// Yield until at least `count` calls have reached the transport.
    pub(crate) async fn wait_for_calls(&self, count: usize) {
        for _ in 0..10_000 {
            if self.call_count() >= count {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("transport saw {} calls, expected {count}", self.call_count());
    }
}

#[async_trait]
impl AskTransport for ScriptedTransport {
    async fn ask(&self, request: &AskRequest) -> Reply {
        let queued = self.queued.lock().unwrap().pop_front();
        if let Some(reply) = queued {
            self.calls.lock().unwrap().push(PendingCall {
                request: request.clone(),
                reply: None,
            });
            return reply;
        }

        let (tx, rx) = oneshot::channel();
        self.calls.lock().unwrap().push(PendingCall {
            request: request.clone(),
            reply: Some(tx),
        });
        rx.await
            .unwrap_or_else(|_| Err(TransportError::Network("reply dropped".into())))
    }
}
