//! # Conduit Runtime
//!
//! The `Store` — runtime coordinator for the envelope/reducer pipeline.
//!
//! A dispatch flows: middleware chain (inspect-then-forward) → async
//! dispatch stage → reducer → change notification. The async stage is the
//! only place an envelope can be swallowed: a pending payload is split off,
//! an `ASYNC_START` lifecycle envelope is dispatched in its place, and the
//! settled result re-enters the pipeline from the top later — unless the
//! view generation changed in the meantime, in which case the result is
//! discarded silently (stale-request suppression).
//!
//! ## Example
//!
//! ```ignore
//! use conduit_runtime::Store;
//!
//! let store = Store::new(AppState::default(), app_reducer(), environment);
//!
//! let mut handle = store.dispatch(action).await?;
//! handle.wait().await;
//!
//! let count = store.state(|s| s.article_list.articles.len()).await;
//! ```

use conduit_core::{Action, Middleware, Reducer, Split};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime.
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations.
    #[derive(Error, Debug, PartialEq, Eq)]
    pub enum StoreError {
        /// The store is shutting down and not accepting new envelopes.
        #[error("store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for in-flight requests to settle.
        #[error("shutdown timed out with {0} requests still in flight")]
        ShutdownTimeout(usize),

        /// Timed out waiting for an in-flight request to settle.
        #[error("timed out waiting for settlement")]
        Timeout,
    }
}

pub use error::StoreError;

/// Boxed middleware trait object installed into a store.
pub type BoxMiddleware<A, E> = Box<dyn Middleware<A, E>>;

/// Handle for awaiting the settlement of an in-flight envelope.
///
/// Returned by [`Store::dispatch`]. Settled envelopes complete immediately;
/// pending ones complete when the settle task finishes — whether its result
/// was dispatched or discarded as stale.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.dispatch(action).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// ```
#[derive(Clone)]
pub struct DispatchHandle {
    remaining: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl DispatchHandle {
    /// Creates a handle for one in-flight request, plus the guard the
    /// settle task holds until it finishes.
    fn in_flight(requests: Arc<AtomicUsize>) -> (Self, SettleGuard) {
        let remaining = Arc::new(AtomicUsize::new(1));
        let (notifier, completion) = watch::channel(());

        let handle = Self {
            remaining: Arc::clone(&remaining),
            completion,
        };
        let guard = SettleGuard {
            remaining,
            notifier,
            requests,
        };

        (handle, guard)
    }

    /// Creates a handle that is already complete.
    ///
    /// Useful for initialization in loops where you need a `last_handle`.
    #[must_use]
    pub fn completed() -> Self {
        let (notifier, completion) = watch::channel(());
        let _ = notifier.send(());

        Self {
            remaining: Arc::new(AtomicUsize::new(0)),
            completion,
        }
    }

    /// Waits until the in-flight request has settled.
    pub async fn wait(&mut self) {
        while self.remaining.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                break;
            }
        }
    }

    /// Waits for settlement with a timeout.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires first.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for DispatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchHandle")
            .field("remaining", &self.remaining.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

/// Releases the pending-request slot and wakes handle waiters on drop, even
/// if the settle task is cancelled.
struct SettleGuard {
    remaining: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
    requests: Arc<AtomicUsize>,
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        self.requests.fetch_sub(1, Ordering::AcqRel);
        if self.remaining.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// The Store — owns the aggregate state and serializes all transitions.
///
/// The Store manages:
/// 1. State (behind `RwLock`; every transition holds the write lock)
/// 2. The reducer composition (business logic)
/// 3. The environment (injected dependencies)
/// 4. The middleware chain and the async dispatch stage
/// 5. The view generation counter used for stale-request suppression
///
/// The store is an explicitly constructed value — its lifecycle belongs to
/// the application entry point, not ambient global state. Cloning it yields
/// another handle onto the same state, middleware chain, and counters.
///
/// # Type Parameters
///
/// - `S`: state type
/// - `A`: envelope type
/// - `E`: environment type
/// - `R`: reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: R,
    environment: E,
    middlewares: Arc<[BoxMiddleware<A, E>]>,
    changes: Arc<watch::Sender<u64>>,
    view_generation: Arc<AtomicU64>,
    pending_requests: Arc<AtomicUsize>,
    shutdown: Arc<AtomicBool>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Action,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Creates a store with no middleware installed.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_middlewares(initial_state, reducer, environment, Vec::new())
    }

    /// Creates a store with a middleware chain.
    ///
    /// Middleware runs in the given order, before the reducers, for every
    /// envelope that reaches the reducer stage — including the synthesized
    /// lifecycle envelopes and settled re-dispatches.
    #[must_use]
    pub fn with_middlewares(
        initial_state: S,
        reducer: R,
        environment: E,
        middlewares: Vec<BoxMiddleware<A, E>>,
    ) -> Self {
        let (changes, _) = watch::channel(0);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer,
            environment,
            middlewares: middlewares.into(),
            changes: Arc::new(changes),
            view_generation: Arc::new(AtomicU64::new(0)),
            pending_requests: Arc::new(AtomicUsize::new(0)),
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Dispatches an envelope into the pipeline.
    ///
    /// Settled envelopes run middleware and the reducer before this method
    /// returns. For an envelope with a pending payload, the method:
    ///
    /// 1. dispatches a synthesized `ASYNC_START` envelope carrying the
    ///    original kind as its subtype (the original envelope is not
    ///    forwarded),
    /// 2. captures the current view generation,
    /// 3. spawns a settle task and returns immediately.
    ///
    /// When the payload settles, the task re-reads the view generation: if
    /// it changed, the result is dropped silently; otherwise `ASYNC_END`
    /// and the settled envelope are dispatched, re-entering the pipeline
    /// from the top. At most one attempt is made per envelope — re-dispatch
    /// on failure is the caller's business.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting
    /// down.
    #[tracing::instrument(skip(self, action), name = "store_dispatch")]
    pub async fn dispatch(&self, action: A) -> Result<DispatchHandle, StoreError>
    where
        R: Clone,
        E: Clone,
    {
        if self.shutdown.load(Ordering::Acquire) {
            tracing::warn!(kind = %action.kind(), "rejected envelope: store is shutting down");
            metrics::counter!("store.shutdown.rejected_envelopes").increment(1);
            return Err(StoreError::ShutdownInProgress);
        }

        metrics::counter!("store.dispatch.total").increment(1);

        match action.split() {
            Split::Settled(action) => {
                self.dispatch_settled(action).await;
                Ok(DispatchHandle::completed())
            }
            Split::InFlight { subtype, settle } => {
                // Genuine dispatch: the lifecycle envelope passes the whole
                // chain and reaches the reducers.
                self.dispatch_settled(A::async_start(subtype)).await;

                let generation = self.view_generation.load(Ordering::Acquire);
                self.pending_requests.fetch_add(1, Ordering::AcqRel);
                let (handle, guard) =
                    DispatchHandle::in_flight(Arc::clone(&self.pending_requests));

                let store = self.clone();
                tokio::spawn(async move {
                    let _guard = guard;
                    let settled = settle.await;

                    if store.view_generation.load(Ordering::Acquire) != generation {
                        // The user navigated away; drop the result with no
                        // further dispatch.
                        tracing::debug!(subtype = %subtype, "discarding stale response");
                        metrics::counter!("store.dispatch.stale_dropped").increment(1);
                        return;
                    }

                    store.dispatch_settled(A::async_end()).await;
                    store.dispatch_settled(settled).await;
                });

                Ok(handle)
            }
        }
    }

    /// Runs a settled envelope through middleware and the reducer, then
    /// notifies subscribers.
    ///
    /// The state write lock is the pipeline's critical section: a dispatch
    /// runs to completion before the next one begins, so middleware
    /// inspection and the reduce land atomically in the transition order.
    async fn dispatch_settled(&self, action: A) {
        {
            let mut state = self.state.write().await;
            tracing::debug!(kind = %action.kind(), "reducing envelope");

            for middleware in self.middlewares.iter() {
                middleware.inspect(&action, &self.environment);
            }
            self.reducer.reduce(&mut state, &action, &self.environment);
        }

        self.changes
            .send_modify(|version| *version = version.wrapping_add(1));
    }

    /// Reads current state via a closure, releasing the lock promptly.
    ///
    /// ```ignore
    /// let page = store.state(|s| s.article_list.current_page).await;
    /// ```
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribes to change notifications.
    ///
    /// The receiver yields a monotonically increasing version; read the
    /// actual state through [`Store::state`]. How views wire this up is
    /// their concern.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Records a navigation to a new logical view.
    ///
    /// Bumps the view generation counter, which invalidates every in-flight
    /// request regardless of kind: their eventual results will be discarded
    /// by the settle tasks' generation check. In-flight work is never
    /// aborted, merely ignored.
    ///
    /// Returns the new generation.
    pub fn note_view_change(&self) -> u64 {
        let generation = self.view_generation.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(generation, "view changed");
        generation
    }

    /// The current view generation.
    #[must_use]
    pub fn view_generation(&self) -> u64 {
        self.view_generation.load(Ordering::Acquire)
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn pending_requests(&self) -> usize {
        self.pending_requests.load(Ordering::Acquire)
    }

    /// Initiates graceful shutdown.
    ///
    /// New envelopes are rejected immediately; requests already in flight
    /// are allowed to settle (their results still land, per the dispatch
    /// contract) until the timeout expires.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ShutdownTimeout`] if requests are still in
    /// flight when the timeout expires.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
        tracing::info!("initiating graceful shutdown");
        metrics::counter!("store.shutdown.initiated").increment(1);

        self.shutdown.store(true, Ordering::Release);

        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(10);

        loop {
            let pending = self.pending_requests.load(Ordering::Acquire);

            if pending == 0 {
                tracing::info!("all requests settled, shutdown complete");
                metrics::counter!("store.shutdown.completed").increment(1);
                return Ok(());
            }

            if start.elapsed() >= timeout {
                tracing::error!(pending, "shutdown timed out with requests in flight");
                metrics::counter!("store.shutdown.timeout").increment(1);
                return Err(StoreError::ShutdownTimeout(pending));
            }

            tokio::time::sleep(poll_interval).await;
        }
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: self.reducer.clone(),
            environment: self.environment.clone(),
            middlewares: Arc::clone(&self.middlewares),
            changes: Arc::clone(&self.changes),
            view_generation: Arc::clone(&self.view_generation),
            pending_requests: Arc::clone(&self.pending_requests),
            shutdown: Arc::clone(&self.shutdown),
        }
    }
}
