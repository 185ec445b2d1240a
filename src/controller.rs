//! Session state for one lookup view.
//!
//! [`QueryController`] owns the only mutable state in the pipeline and
//! publishes it through a `watch` channel. Every submission takes a new
//! generation number; a lookup may only settle the state (or attach its
//! sprite) while its generation is still the latest, so a slow stale lookup
//! can never overwrite a newer one.

use crate::aggregator::{normalize_query, Aggregator};
use crate::catalog::{CatalogClient, SpriteResolver};
use crate::entry::DexEntry;
use crate::errors::{LookupError, LookupResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

/// Which of the three views the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Pending,
    Settled,
}

/// Observable session state. At most one of `pending`, `result` and
/// `error_message` is set at any time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub query: String,
    pub pending: bool,
    pub result: Option<Arc<DexEntry>>,
    pub error_message: Option<String>,
    pub image_url: Option<String>,
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        if self.pending {
            SessionStatus::Pending
        } else if self.result.is_some() || self.error_message.is_some() {
            SessionStatus::Settled
        } else {
            SessionStatus::Idle
        }
    }

    fn pending(query: String) -> Self {
        Self {
            query,
            pending: true,
            ..Self::default()
        }
    }
}

pub struct QueryController<C> {
    inner: Arc<ControllerInner<C>>,
}

struct ControllerInner<C> {
    aggregator: Aggregator<C>,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl<C> Clone for QueryController<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C> QueryController<C>
where
    C: CatalogClient + SpriteResolver + 'static,
{
    pub fn new(aggregator: Aggregator<C>) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            inner: Arc::new(ControllerInner {
                aggregator,
                state,
                generation: AtomicU64::new(0),
                in_flight: Mutex::new(None),
            }),
        }
    }

    /// Receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Fire-and-forget entry point for the presentation layer.
    ///
    /// Empty or whitespace text is refused with [`LookupError::EmptyQuery`]
    /// before anything changes. Otherwise the state goes Pending right away,
    /// the lookup runs on a spawned task, and any earlier spawned lookup is
    /// aborted.
    pub fn submit_query(&self, text: &str) -> LookupResult<JoinHandle<LookupResult<Arc<DexEntry>>>> {
        let query = normalize_query(text).ok_or(LookupError::EmptyQuery)?;

        // Held across begin + spawn + swap so the newest generation always
        // owns the slot and only older tasks get aborted.
        let mut in_flight = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let generation = self.begin(query.clone());
        let controller = self.clone();
        let handle = tokio::spawn(async move { controller.execute(generation, &query).await });

        if let Some(previous) = in_flight.replace(handle.abort_handle()) {
            previous.abort();
        }

        Ok(handle)
    }

    /// Same transitions as [`Self::submit_query`], awaited in place.
    pub async fn run_query(&self, text: &str) -> LookupResult<Arc<DexEntry>> {
        let query = normalize_query(text).ok_or(LookupError::EmptyQuery)?;
        let generation = self.begin(query.clone());
        self.execute(generation, &query).await
    }

    fn begin(&self, query: String) -> u64 {
        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SessionState::pending(query);
        });
        debug!(generation, "lookup pending");
        generation
    }

    async fn execute(&self, generation: u64, query: &str) -> LookupResult<Arc<DexEntry>> {
        match self.inner.aggregator.lookup(query).await {
            Ok(entry) => {
                let entry = Arc::new(entry);
                if self.settle(generation, Ok(Arc::clone(&entry))) {
                    let controller = self.clone();
                    let name = entry.name.clone();
                    tokio::spawn(async move { controller.attach_sprite(generation, &name).await });
                }
                Ok(entry)
            }
            Err(err) => {
                warn!(query, error = %err, "lookup failed");
                self.settle(generation, Err(err.user_message()));
                Err(err)
            }
        }
    }

    /// Applies an outcome if `generation` is still current. Returns whether it was applied.
    fn settle(&self, generation: u64, outcome: Result<Arc<DexEntry>, String>) -> bool {
        self.inner.state.send_if_modified(|state| {
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                debug!(generation, "discarding superseded lookup");
                return false;
            }
            state.pending = false;
            match outcome {
                Ok(entry) => state.result = Some(entry),
                Err(message) => state.error_message = Some(message),
            }
            true
        })
    }

    async fn attach_sprite(&self, generation: u64, display_name: &str) {
        let Some(url) = self.inner.aggregator.client().resolve_image(display_name).await else {
            debug!(display_name, "no sprite available");
            return;
        };

        self.inner.state.send_if_modified(|state| {
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            state.image_url = Some(url);
            true
        });
    }
}
