//! Keyed fetch-with-fallback resource.
//!
//! A [`Resource`] owns one logical piece of remote data. Activating it with a
//! key runs the producer; the outcome is published through a `watch` channel
//! as a [`ResourceState`]. Requests are never aborted: a request that was
//! superseded by a key change or by [`Resource::teardown`] runs to completion
//! and its result is dropped.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::future::{BoxFuture, FutureExt};
use tokio::sync::watch;

use crate::error::ApiError;

/// Async function producing the resource value for a key.
pub type Producer<K, T> = Arc<dyn Fn(K) -> BoxFuture<'static, Result<T, ApiError>> + Send + Sync>;

/// Substitute value for a key whose fetch failed before any data was held.
pub type Fallback<K, T> = Arc<dyn Fn(&K) -> T + Send + Sync>;

/// Wraps an async closure as a [`Producer`].
pub fn producer<K, T, F, Fut>(f: F) -> Producer<K, T>
where
    F: Fn(K) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
{
    Arc::new(move |key| f(key).boxed())
}

/// Snapshot of a resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub loading: bool,
    /// Message of the most recent failure, cleared when a new request starts.
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

struct Control<K> {
    key: Option<K>,
    /// Bumped on every key change and on teardown. A completion whose epoch
    /// no longer matches is stale.
    epoch: u64,
    /// Requests started under the current epoch that have not completed.
    in_flight: usize,
}

struct Inner<K, T> {
    producer: Producer<K, T>,
    fallback: Option<Fallback<K, T>>,
    control: Mutex<Control<K>>,
    state: watch::Sender<ResourceState<T>>,
}

/// Cheap to clone; clones share state.
pub struct Resource<K, T> {
    inner: Arc<Inner<K, T>>,
}

impl<K, T> Clone for Resource<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, T> Resource<K, T>
where
    K: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    /// Creates an idle resource. `fallback`, when given, is substituted on
    /// failure if no data is held yet.
    pub fn new(producer: Producer<K, T>, fallback: Option<T>) -> Self {
        let fallback =
            fallback.map(|value| -> Fallback<K, T> { Arc::new(move |_: &K| value.clone()) });
        Self::build(producer, fallback)
    }

    /// Like [`Resource::new`] but derives the fallback from the failed key.
    pub fn with_fallback_fn<F>(producer: Producer<K, T>, fallback: F) -> Self
    where
        F: Fn(&K) -> T + Send + Sync + 'static,
    {
        Self::build(producer, Some(Arc::new(fallback)))
    }

    fn build(producer: Producer<K, T>, fallback: Option<Fallback<K, T>>) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self {
            inner: Arc::new(Inner {
                producer,
                fallback,
                control: Mutex::new(Control {
                    key: None,
                    epoch: 0,
                    in_flight: 0,
                }),
                state,
            }),
        }
    }

    /// Starts a fetch for `key` unless the resource is already active on an
    /// equal key. Must be called from within a Tokio runtime.
    pub fn activate(&self, key: K) {
        let epoch = {
            let mut control = self.inner.lock_control();
            if control.key.as_ref() == Some(&key) {
                return;
            }
            control.epoch += 1;
            control.key = Some(key.clone());
            control.in_flight = 0;
            self.inner.begin(&mut control)
        };
        self.spawn_fetch(key, epoch);
    }

    /// Re-runs the producer for the current key. Held data stays visible
    /// while the request is in flight, and `loading` stays set until every
    /// request of the current key has completed. Does nothing before
    /// activation.
    pub fn refetch(&self) {
        let (key, epoch) = {
            let mut control = self.inner.lock_control();
            let Some(key) = control.key.clone() else {
                return;
            };
            (key, self.inner.begin(&mut control))
        };
        self.spawn_fetch(key, epoch);
    }

    /// Detaches the resource: every in-flight request becomes stale. A later
    /// [`Resource::activate`] starts fresh even with the previous key.
    pub fn teardown(&self) {
        let mut control = self.inner.lock_control();
        control.epoch += 1;
        control.key = None;
        control.in_flight = 0;
        self.inner.state.send_modify(|s| s.loading = false);
    }

    #[must_use]
    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    /// Waits until no request is in flight and returns that state.
    pub async fn settled(&self) -> ResourceState<T> {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(|s| !s.loading).await {
            Ok(state) => state.clone(),
            // The sender lives in `inner`, which `self` keeps alive.
            Err(_) => self.state(),
        };
        settled
    }

    fn spawn_fetch(&self, key: K, epoch: u64) {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let result = (inner.producer)(key.clone()).await;
            inner.complete(epoch, &key, result);
        });
    }
}

impl<K, T> Inner<K, T> {
    fn lock_control(&self) -> MutexGuard<'_, Control<K>> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a request under the current epoch and marks the state as
    /// loading. Called with the control lock held.
    fn begin(&self, control: &mut Control<K>) -> u64 {
        control.in_flight += 1;
        self.state.send_modify(|s| {
            s.loading = true;
            s.error = None;
        });
        control.epoch
    }

    fn complete(&self, epoch: u64, key: &K, result: Result<T, ApiError>) {
        // Held across the publish so a concurrent key change cannot slip in
        // between the epoch check and the write.
        let mut control = self.lock_control();
        if control.epoch != epoch {
            tracing::debug!(epoch, current = control.epoch, "discarding stale result");
            return;
        }
        control.in_flight = control.in_flight.saturating_sub(1);
        let loading = control.in_flight > 0;

        match result {
            Ok(value) => self.state.send_modify(|s| {
                s.data = Some(value);
                s.loading = loading;
                s.error = None;
            }),
            Err(e) => {
                tracing::warn!(error = %e, "fetch failed");
                let fallback = self.fallback.as_ref();
                self.state.send_modify(|s| {
                    s.loading = loading;
                    s.error = Some(e.to_string());
                    if s.data.is_none() {
                        s.data = fallback.map(|f| f(key));
                    }
                });
            }
        }
    }
}

#[cfg(test)]
#[path = "resource_test.rs"]
mod tests;
