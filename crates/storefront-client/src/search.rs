//! Debounced product search.
//!
//! [`DebouncedSearch::set_query`] is meant to be called on every keystroke.
//! Execution waits for a quiet window; every new query aborts the pending
//! timer. Requests already sent are never aborted, but only the most recently
//! issued search may publish its results.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use storefront_core::Product;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::Catalog;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Latest query value, which may not have been searched yet.
    pub query: String,
    /// Query the current `results` answer.
    pub results_for: String,
    pub results: Vec<Product>,
    pub loading: bool,
    pub error: Option<String>,
}

struct Shared {
    catalog: Arc<dyn Catalog>,
    /// Searched locally when the catalog fails.
    fallback: Vec<Product>,
    generation: AtomicU64,
    state: watch::Sender<SearchState>,
}

pub struct DebouncedSearch {
    shared: Arc<Shared>,
    delay: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl DebouncedSearch {
    #[must_use]
    pub fn new(catalog: Arc<dyn Catalog>, fallback: Vec<Product>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            shared: Arc::new(Shared {
                catalog,
                fallback,
                generation: AtomicU64::new(0),
                state,
            }),
            delay,
            timer: Mutex::new(None),
        }
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Records a new query value. A blank query clears the results at once;
    /// anything else is searched after the quiet window unless another
    /// query arrives first. Must be called from within a Tokio runtime.
    pub fn set_query(&self, query: &str) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = timer.take() {
            pending.abort();
        }

        let query = query.to_string();
        if query.trim().is_empty() {
            self.shared.clear(&query);
            return;
        }

        self.shared
            .state
            .send_modify(|s| s.query.clone_from(&query));

        let shared = Arc::clone(&self.shared);
        let delay = self.delay;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::debug!(query = %query, "debounce window elapsed");
            // Detached so that a later abort of this timer leaves the request
            // running.
            tokio::spawn(async move { shared.execute(&query).await });
        }));
    }

    /// Searches immediately, bypassing the debounce, and returns the
    /// published state. A blank query clears the results without searching.
    pub async fn search(&self, query: &str) -> SearchState {
        if let Some(pending) = self
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
        if query.trim().is_empty() {
            self.shared.clear(query);
            return self.state();
        }
        self.shared
            .state
            .send_modify(|s| s.query = query.to_string());
        self.shared.execute(query).await;
        self.state()
    }

    #[must_use]
    pub fn state(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        if let Some(pending) = self
            .timer
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            pending.abort();
        }
    }
}

impl Shared {
    /// Supersedes any in-flight search and empties the results.
    fn clear(&self, query: &str) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|s| {
            s.query = query.to_string();
            s.results_for = query.to_string();
            s.results.clear();
            s.loading = false;
            s.error = None;
        });
    }

    async fn execute(&self, query: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });

        let result = self.catalog.search(query).await;

        // The generation check runs under the channel's write lock so a newer
        // search cannot publish in between.
        self.state.send_if_modified(|s| {
            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(query, "discarding stale search result");
                return false;
            }
            s.results_for = query.to_string();
            match &result {
                Ok(found) => {
                    s.results.clone_from(&found.products);
                    s.error = None;
                }
                Err(e) => {
                    tracing::warn!(query, error = %e, "search failed, using offline results");
                    s.results = filter_fallback(&self.fallback, query);
                    s.error = Some(e.to_string());
                }
            }
            s.loading = false;
            true
        });
    }
}

/// Case-insensitive substring match on name and description.
fn filter_fallback(products: &[Product], query: &str) -> Vec<Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
