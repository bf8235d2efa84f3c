//! Query controller: owns the query text, debounces input and keeps
//! out-of-order gateway responses from overwriting newer state.
//!
//! Every [`QueryController::set_query`] bumps a generation counter. A
//! debounce timer task is scheduled for non-empty queries; when it fires,
//! the gateway call runs on its own task and its response comes back over
//! a channel tagged with the generation it was issued for. Responses whose
//! generation is no longer current are dropped in [`QueryController::apply`].
//!
//! Changing the query aborts a pending timer, so keystrokes faster than the
//! debounce window never reach the gateway. Requests already in flight are
//! left to finish; generation tagging alone makes them harmless.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::core::search::RawResult;
use crate::error::EncoreResult;
use crate::services::gateway::SearchGateway;

/// A gateway answer tagged with the generation it belongs to.
#[derive(Debug)]
pub struct SearchResponse {
    pub generation: u64,
    pub query: String,
    pub outcome: EncoreResult<Vec<RawResult>>,
}

/// What [`QueryController::apply`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Current generation, results stored
    Applied,
    /// Current generation, gateway failed; `error` is set
    Failed,
    /// Older generation, dropped
    Stale,
}

pub struct QueryController {
    gateway: Arc<dyn SearchGateway>,
    debounce: Duration,
    query: String,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    tx: UnboundedSender<SearchResponse>,
    rx: UnboundedReceiver<SearchResponse>,
    results: Vec<RawResult>,
    is_loading: bool,
    error: Option<String>,
}

impl QueryController {
    pub fn new(gateway: Arc<dyn SearchGateway>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            gateway,
            debounce,
            query: String::new(),
            generation: 0,
            timer: None,
            tx,
            rx,
            results: Vec::new(),
            is_loading: false,
            error: None,
        }
    }

    /// Replace the query and start a new generation.
    ///
    /// Blank queries never reach the gateway. Returns the new generation.
    pub fn set_query(&mut self, text: impl Into<String>) -> u64 {
        self.query = text.into();
        self.generation += 1;
        self.cancel_timer();
        self.results.clear();
        self.error = None;

        if self.query.trim().is_empty() {
            self.is_loading = false;
        } else {
            self.schedule();
        }

        self.generation
    }

    /// Drop pending work and make any in-flight response stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.cancel_timer();
        self.is_loading = false;
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn schedule(&mut self) {
        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(error = %e, "search scheduled outside an async runtime");
                self.is_loading = false;
                self.error = Some("search is unavailable".to_string());
                return;
            }
        };

        let gateway = Arc::clone(&self.gateway);
        let tx = self.tx.clone();
        let generation = self.generation;
        let query = self.query.clone();
        let debounce = self.debounce;
        let spawner = handle.clone();

        self.is_loading = true;
        self.timer = Some(handle.spawn(async move {
            tokio::time::sleep(debounce).await;
            tracing::debug!(generation, %query, "dispatching search");

            let request = gateway.search(&query);
            // Detached: aborting the timer must not cancel a dispatched request
            spawner.spawn(async move {
                let outcome = request.await;
                // Receiver gone means the controller was dropped
                let _ = tx.send(SearchResponse {
                    generation,
                    query,
                    outcome,
                });
            });
        }));
    }

    /// Apply a gateway response if it belongs to the current generation.
    pub fn apply(&mut self, response: SearchResponse) -> ApplyOutcome {
        if response.generation != self.generation {
            tracing::debug!(
                response = response.generation,
                current = self.generation,
                query = %response.query,
                "dropping stale search response"
            );
            return ApplyOutcome::Stale;
        }

        self.is_loading = false;
        self.timer = None;

        match response.outcome {
            Ok(results) => {
                self.results = results;
                self.error = None;
                ApplyOutcome::Applied
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %response.query, "search failed");
                self.results.clear();
                self.error = Some(e.to_string());
                ApplyOutcome::Failed
            }
        }
    }

    /// Wait for the next gateway response.
    ///
    /// Pends until a response arrives; use inside `select!` alongside input.
    pub async fn next_response(&mut self) -> Option<SearchResponse> {
        self.rx.recv().await
    }

    /// Take a response that has already arrived, if any.
    pub fn try_next_response(&mut self) -> Option<SearchResponse> {
        self.rx.try_recv().ok()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Results of the current generation (empty until applied).
    pub fn results(&self) -> &[RawResult] {
        &self.results
    }
}

impl Drop for QueryController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
