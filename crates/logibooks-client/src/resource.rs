//! Generic async resource: a remotely sourced value with observable
//! loading and error state.
//!
//! ```text
//! Idle ──load()──▶ Loading ──ok──▶ Success
//!                     │                │
//!                     └──err──▶ Failed ◀┘ (load() again re-enters Loading)
//! ```
//!
//! Every `load()` takes a ticket. Only the completion holding the latest
//! ticket may write state; older completions are dropped, so overlapping
//! loads settle on the most recently issued request rather than the one
//! that happened to finish last.
//!
//! A `load()` future dropped before it settles (timeout, `select!`, task
//! abort) rolls the resource back to the last settled phase.

use crate::error::{ClientError, Result};
use std::future::Future;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Lifecycle phase of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Never loaded (or explicitly reset)
    Idle,
    /// A fetch is in flight
    Loading,
    /// The latest fetch succeeded
    Success,
    /// The latest fetch failed
    Failed,
}

/// Snapshot of a resource's observable fields.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    /// Last successfully loaded value, or the initial value
    pub value: T,
    /// True strictly between the start and settlement of the latest fetch
    pub loading: bool,
    /// Failure of the latest fetch, if it failed
    pub error: Option<Arc<ClientError>>,
    /// Lifecycle phase
    pub phase: Phase,
}

struct Inner<T> {
    state: ResourceState<T>,
    latest_ticket: u64,
    /// Phase and error of the last settled load
    settled: (Phase, Option<Arc<ClientError>>),
}

impl<T> Inner<T> {
    fn settle(&mut self, phase: Phase, error: Option<Arc<ClientError>>) {
        self.state.loading = false;
        self.state.phase = phase;
        self.state.error = error.clone();
        self.settled = (phase, error);
    }
}

/// Armed while a `load()` awaits its fetch.
struct PendingLoad<'a, T> {
    name: &'static str,
    inner: &'a RwLock<Inner<T>>,
    ticket: u64,
    armed: bool,
}

impl<T> Drop for PendingLoad<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if inner.latest_ticket != self.ticket {
            return;
        }
        tracing::debug!(resource = self.name, ticket = self.ticket, "load cancelled");
        let (phase, error) = inner.settled.clone();
        inner.state.loading = false;
        inner.state.phase = phase;
        inner.state.error = error;
    }
}

/// A collection or singleton fetched from the backend.
///
/// State is only mutated through this type's methods. Readers take cloned
/// snapshots; no lock is held across an await point.
pub struct AsyncResource<T> {
    name: &'static str,
    initial: T,
    inner: RwLock<Inner<T>>,
}

impl<T: Clone> AsyncResource<T> {
    /// Create an idle resource holding `initial`.
    pub fn new(name: &'static str, initial: T) -> Self {
        let state = ResourceState {
            value: initial.clone(),
            loading: false,
            error: None,
            phase: Phase::Idle,
        };
        Self {
            name,
            initial,
            inner: RwLock::new(Inner {
                state,
                latest_ticket: 0,
                settled: (Phase::Idle, None),
            }),
        }
    }

    /// Name used in log output.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Clone the current observable state.
    #[must_use]
    pub fn snapshot(&self) -> ResourceState<T> {
        self.read().state.clone()
    }

    /// Clone the current value.
    #[must_use]
    pub fn value(&self) -> T {
        self.read().state.value.clone()
    }

    /// Whether the latest fetch is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.read().state.loading
    }

    /// Failure of the latest fetch, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<Arc<ClientError>> {
        self.read().state.error.clone()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.read().state.phase
    }

    /// Run `fetch` and apply its outcome.
    ///
    /// On success the value is replaced; on failure the error is recorded and
    /// the previous value kept. The failure is never returned to the caller.
    ///
    /// Returns `false` when a newer `load()` was issued before this one
    /// settled, in which case the outcome is discarded.
    pub async fn load<F, Fut>(&self, fetch: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let ticket = {
            let mut inner = self.write();
            inner.latest_ticket += 1;
            inner.state.loading = true;
            inner.state.error = None;
            inner.state.phase = Phase::Loading;
            inner.latest_ticket
        };
        tracing::debug!(resource = self.name, ticket, "load started");

        let mut pending = PendingLoad {
            name: self.name,
            inner: &self.inner,
            ticket,
            armed: true,
        };
        let outcome = fetch().await;
        pending.armed = false;

        let mut inner = self.write();
        if inner.latest_ticket != ticket {
            tracing::debug!(
                resource = self.name,
                ticket,
                latest = inner.latest_ticket,
                "discarding stale response"
            );
            return false;
        }

        match outcome {
            Ok(value) => {
                inner.state.value = value;
                inner.settle(Phase::Success, None);
            }
            Err(err) => {
                tracing::warn!(resource = self.name, "load failed: {err}");
                inner.settle(Phase::Failed, Some(Arc::new(err)));
            }
        }
        true
    }

    /// Restore the initial value and the idle phase.
    ///
    /// Any fetch still in flight is invalidated.
    pub fn reset(&self) {
        let mut inner = self.write();
        inner.latest_ticket += 1;
        inner.state = ResourceState {
            value: self.initial.clone(),
            loading: false,
            error: None,
            phase: Phase::Idle,
        };
        inner.settled = (Phase::Idle, None);
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<T>> {
        self.inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;
    use tokio::time::timeout;

    fn dropped() -> ClientError {
        ClientError::Internal("sender dropped".to_string())
    }

    #[tokio::test]
    async fn test_initial_state() {
        let resource: AsyncResource<Vec<i32>> = AsyncResource::new("numbers", Vec::new());
        let state = resource.snapshot();
        assert!(state.value.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.phase, Phase::Idle);
    }

    #[tokio::test]
    async fn test_successful_load() {
        let resource = AsyncResource::new("numbers", Vec::new());
        let applied = resource.load(|| async { Ok(vec![1, 2, 3]) }).await;

        assert!(applied);
        assert_eq!(resource.value(), vec![1, 2, 3]);
        assert!(!resource.is_loading());
        assert!(resource.error().is_none());
        assert_eq!(resource.phase(), Phase::Success);
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_value() {
        let resource = AsyncResource::new("numbers", Vec::new());
        resource.load(|| async { Ok(vec![7]) }).await;

        resource
            .load(|| async {
                Err(ClientError::Api {
                    path: "numbers".to_string(),
                    status: 500,
                    message: "boom".to_string(),
                })
            })
            .await;

        assert_eq!(resource.value(), vec![7]);
        assert!(!resource.is_loading());
        assert_eq!(resource.error().and_then(|e| e.status()), Some(500));
        assert_eq!(resource.phase(), Phase::Failed);

        // A new load clears the error.
        resource.load(|| async { Ok(vec![8]) }).await;
        assert!(resource.error().is_none());
        assert_eq!(resource.value(), vec![8]);
    }

    #[tokio::test]
    async fn test_loading_flag_while_in_flight() {
        let resource = AsyncResource::new("numbers", Vec::new());
        let (tx, rx) = oneshot::channel::<Vec<i32>>();

        let load = resource.load(|| async move { rx.await.map_err(|_| dropped()) });
        let driver = async {
            tokio::task::yield_now().await;
            assert!(resource.is_loading());
            assert_eq!(resource.phase(), Phase::Loading);
            tx.send(vec![1]).unwrap();
        };
        let (applied, ()) = futures::join!(load, driver);

        assert!(applied);
        assert!(!resource.is_loading());
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let resource = AsyncResource::new("numbers", Vec::new());
        let (tx1, rx1) = oneshot::channel::<Vec<i32>>();
        let (tx2, rx2) = oneshot::channel::<Vec<i32>>();

        let first = resource.load(|| async move { rx1.await.map_err(|_| dropped()) });
        let second = resource.load(|| async move { rx2.await.map_err(|_| dropped()) });
        let driver = async {
            tokio::task::yield_now().await;
            // The older request finishes first and must not land.
            tx1.send(vec![1]).unwrap();
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            assert!(resource.value().is_empty());
            assert!(resource.is_loading());
            tx2.send(vec![2]).unwrap();
        };
        let (first_applied, second_applied, ()) = futures::join!(first, second, driver);

        assert!(!first_applied);
        assert!(second_applied);
        assert_eq!(resource.value(), vec![2]);
        assert!(!resource.is_loading());
    }

    #[tokio::test]
    async fn test_newer_request_wins_even_when_older_finishes_last() {
        let resource = AsyncResource::new("numbers", Vec::new());
        let (tx1, rx1) = oneshot::channel::<Vec<i32>>();
        let (tx2, rx2) = oneshot::channel::<Vec<i32>>();

        let first = resource.load(|| async move { rx1.await.map_err(|_| dropped()) });
        let second = resource.load(|| async move { rx2.await.map_err(|_| dropped()) });
        let driver = async {
            tokio::task::yield_now().await;
            tx2.send(vec![2]).unwrap();
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            tx1.send(vec![1]).unwrap();
        };
        let (first_applied, second_applied, ()) = futures::join!(first, second, driver);

        assert!(!first_applied);
        assert!(second_applied);
        assert_eq!(resource.value(), vec![2]);
    }

    #[tokio::test]
    async fn test_cancelled_load_returns_to_idle() {
        let resource: AsyncResource<Vec<i32>> = AsyncResource::new("numbers", Vec::new());
        let cancelled = timeout(Duration::from_millis(10), resource.load(std::future::pending)).await;

        assert!(cancelled.is_err());
        assert!(!resource.is_loading());
        assert_eq!(resource.phase(), Phase::Idle);
        assert!(resource.error().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_load_keeps_last_settled_state() {
        let resource = AsyncResource::new("numbers", Vec::new());
        resource.load(|| async { Ok(vec![4]) }).await;
        let _ = timeout(Duration::from_millis(10), resource.load(std::future::pending)).await;
        assert!(!resource.is_loading());
        assert_eq!(resource.phase(), Phase::Success);
        assert_eq!(resource.value(), vec![4]);

        resource.load(|| async { Err(ClientError::Internal("boom".to_string())) }).await;
        let _ = timeout(Duration::from_millis(10), resource.load(std::future::pending)).await;
        assert!(!resource.is_loading());
        assert_eq!(resource.phase(), Phase::Failed);
        assert!(resource.error().is_some());
    }

    #[tokio::test]
    async fn test_cancelling_a_stale_load_leaves_newer_in_flight() {
        let resource = AsyncResource::new("numbers", Vec::new());
        let (tx, rx) = oneshot::channel::<Vec<i32>>();

        let first = timeout(Duration::from_millis(10), resource.load(std::future::pending));
        let second = resource.load(|| async move { rx.await.map_err(|_| dropped()) });
        let driver = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            // The first load has timed out; the second still owns the state.
            assert!(resource.is_loading());
            assert_eq!(resource.phase(), Phase::Loading);
            tx.send(vec![2]).unwrap();
        };
        let (first, applied, ()) = futures::join!(first, second, driver);

        assert!(first.is_err());
        assert!(applied);
        assert_eq!(resource.value(), vec![2]);
        assert!(!resource.is_loading());
    }

    #[tokio::test]
    async fn test_reset() {
        let resource = AsyncResource::new("numbers", vec![0]);
        resource.load(|| async { Ok(vec![5]) }).await;
        resource.reset();

        let state = resource.snapshot();
        assert_eq!(state.value, vec![0]);
        assert_eq!(state.phase, Phase::Idle);
        assert!(!state.loading);
    }
}
