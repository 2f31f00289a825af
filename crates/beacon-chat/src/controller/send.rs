//! `send_message` and completion handling.

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::cooldown::Acquire;
use crate::request::{RequestOutcome, RequestToken};
use crate::transport::AskRequest;
use crate::Message;

use super::state::{failure_message, wait_text, SendOutcome, TIMEOUT_TEXT};
use super::ChatController;

impl ChatController {
    /// Send `text` to the assistant and record the outcome.
    ///
    /// A call made while another is in flight supersedes it: the older
    /// request is cancelled and its result, if any, is discarded.
    ///
    /// Once accepted, the request settles even if this future is dropped.
    pub async fn send_message(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }

        let (ticket, pending) = {
            let mut state = self.inner.lock();

            if let Acquire::Rejected { remaining_seconds } = state.gate.try_acquire(Instant::now())
            {
                debug!(remaining_seconds, "send rejected by cooldown");
                state.error = Some(wait_text(remaining_seconds));
                self.inner.publish(&state);
                return SendOutcome::RateLimited { remaining_seconds };
            }

            let request = AskRequest::new(text, &state.messages);
            state.messages.push(Message::user(text));
            self.inner.store.save(&state.messages);
            state.loading = true;
            state.error = None;

            let ticket = state.requests.begin();
            let pending = state.requests.issue(&ticket, request);
            debug!(token = %ticket.token(), history = state.messages.len() - 1, "ask issued");

            self.start_countdown(&mut state);
            self.inner.publish(&state);
            (ticket, pending)
        };

        // Settle on a detached task so a dropped caller cannot strand the
        // ticket or leave `loading` set.
        let chat = self.clone();
        let token = ticket.token();
        let settle = tokio::spawn(async move {
            let outcome = pending.await;
            chat.complete(token, outcome)
        });

        match settle.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%token, "chat request task failed: {e}");
                SendOutcome::Discarded
            }
        }
    }

    fn complete(&self, token: RequestToken, outcome: RequestOutcome) -> SendOutcome {
        let mut state = self.inner.lock();

        if !state.requests.finish(token) {
            debug!(%token, "discarding result of superseded request");
            return SendOutcome::Discarded;
        }

        match &outcome {
            RequestOutcome::Success(reply) => {
                state.messages.push(Message::assistant(reply.clone()));
            }
            RequestOutcome::Cancelled => {}
            failed => {
                match failed {
                    RequestOutcome::Timeout => {
                        warn!(%token, "chat request timed out");
                        state.error = Some(TIMEOUT_TEXT.to_string());
                    }
                    other => warn!(%token, outcome = ?other, "chat request failed"),
                }
                if let Some(message) = failure_message(failed) {
                    state.messages.push(message);
                }
            }
        }

        state.loading = false;
        self.inner.store.save(&state.messages);
        self.inner.publish(&state);

        if outcome == RequestOutcome::Cancelled {
            return SendOutcome::Discarded;
        }
        SendOutcome::Completed(outcome)
    }
}
