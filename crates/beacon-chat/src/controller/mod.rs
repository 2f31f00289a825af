//! Chat session controller.
//!
//! Composes the history store, cooldown gate and request manager behind a
//! cloneable handle. Every state change is published on a watch channel
//! so a front-end can re-render without polling.

mod send;
mod state;


use std::sync::{Arc, Mutex, MutexGuard, Weak};

use beacon_common::BeaconError;
use tokio::sync::watch;
use tokio::time::{Duration, Instant};
use tracing::{debug, info};

use crate::cooldown::CooldownGate;
use crate::request::RequestManager;
use crate::settings::ChatSettings;
use crate::store::HistoryStore;
use crate::transport::{AskTransport, HttpTransport};
use crate::Message;

pub use state::{ChatSnapshot, SendOutcome};

use state::SessionState;

/// Handle to one conversation. Clones share the same session.
#[derive(Clone)]
pub struct ChatController {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<SessionState>,
    store: HistoryStore,
    snapshots: watch::Sender<ChatSnapshot>,
    countdown_tick: Duration,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn publish(&self, state: &SessionState) {
        self.snapshots.send_replace(state.snapshot(Instant::now()));
    }
}

impl ChatController {
    /// Create a session, restoring whatever history `store` holds.
    pub fn new(
        transport: Arc<dyn AskTransport>,
        store: HistoryStore,
        settings: &ChatSettings,
    ) -> Self {
        let messages = store.load();
        debug!(restored = messages.len(), "chat session created");

        let state = SessionState {
            messages,
            loading: false,
            error: None,
            gate: CooldownGate::new(settings.cooldown),
            requests: RequestManager::new(transport, settings.request_timeout),
            countdown_running: false,
        };
        let (snapshots, _) = watch::channel(state.snapshot(Instant::now()));

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                store,
                snapshots,
                countdown_tick: settings.countdown_tick,
            }),
        }
    }

    /// Session talking to the real backend over HTTP.
    pub fn with_http(settings: &ChatSettings, store: HistoryStore) -> Result<Self, BeaconError> {
        let transport = HttpTransport::new(settings)?;
        Ok(Self::new(Arc::new(transport), store, settings))
    }

    /// Empty the log and the persisted slot.
    ///
    /// An in-flight request is left alone and may still append its reply.
    pub fn clear_history(&self) {
        let mut state = self.inner.lock();
        state.messages.clear();
        state.error = None;
        self.inner.store.clear();
        info!("chat history cleared");
        self.inner.publish(&state);
    }

    /// Cancel the in-flight request, if any. Appends nothing.
    pub fn cancel(&self) {
        let mut state = self.inner.lock();
        if let Some(token) = state.requests.cancel() {
            info!(%token, "chat request cancelled by user");
        }
        state.loading = false;
        self.inner.publish(&state);
    }

    pub fn snapshot(&self) -> ChatSnapshot {
        self.inner.lock().snapshot(Instant::now())
    }

    /// Receiver that sees every published snapshot, including countdown ticks.
    pub fn subscribe(&self) -> watch::Receiver<ChatSnapshot> {
        self.inner.snapshots.subscribe()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.inner.lock().messages.clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.lock().loading
    }

    pub fn error(&self) -> Option<String> {
        self.inner.lock().error.clone()
    }

    pub fn cooldown_remaining(&self) -> u64 {
        self.inner.lock().gate.remaining_seconds(Instant::now())
    }

    /// Start the display countdown unless one is already running.
    ///
    /// Purely cosmetic: it republishes snapshots so `cooldown_remaining`
    /// counts down on screen. The gate itself never reads it.
    fn start_countdown(&self, state: &mut SessionState) {
        if state.countdown_running
            || self.inner.countdown_tick.is_zero()
            || !state.gate.is_active(Instant::now())
        {
            return;
        }
        state.countdown_running = true;

        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let tick = self.inner.countdown_tick;
        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + tick, tick);
            loop {
                interval.tick().await;
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                let finished = {
                    let mut state = inner.lock();
                    inner.publish(&state);
                    let finished = !state.gate.is_active(Instant::now());
                    if finished {
                        state.countdown_running = false;
                    }
                    finished
                };
                if finished {
                    break;
                }
            }
        });
    }
}

impl std::fmt::Debug for ChatController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("ChatController")
            .field("messages", &state.messages.len())
            .field("loading", &state.loading)
            .field("error", &state.error)
            .field("requests", &state.requests)
            .finish()
    }
}
