//! Mock implementations of environment traits and payload helpers.

use conduit_core::action::Action;
use conduit_core::environment::CredentialStore;
use conduit_core::middleware::Middleware;
use conduit_core::payload::{ApiError, Payload};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// In-memory credential store that records every write.
///
/// Clones share the same backing map and write log, so a test can hand one
/// clone to the environment and keep another for assertions.
///
/// # Example
///
/// ```
/// use conduit_core::environment::{CREDENTIAL_KEY, CredentialStore};
/// use conduit_testing::mocks::MemoryCredentialStore;
///
/// let store = MemoryCredentialStore::new();
/// store.set_item(CREDENTIAL_KEY, "abc123");
/// assert_eq!(store.get_item(CREDENTIAL_KEY).as_deref(), Some("abc123"));
/// assert_eq!(store.write_count(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryCredentialStore {
    items: Arc<Mutex<HashMap<String, String>>>,
    write_log: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(key, value)` pair passed to `set_item`, in call order.
    #[must_use]
    #[allow(clippy::expect_used)] // Test mock; a poisoned lock means a test already failed
    pub fn writes(&self) -> Vec<(String, String)> {
        self.write_log.lock().expect("write log lock poisoned").clone()
    }

    /// Number of `set_item` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes().len()
    }
}

impl CredentialStore for MemoryCredentialStore {
    #[allow(clippy::expect_used)] // Test mock; a poisoned lock means a test already failed
    fn set_item(&self, key: &str, value: &str) {
        self.items
            .lock()
            .expect("items lock poisoned")
            .insert(key.to_string(), value.to_string());
        self.write_log
            .lock()
            .expect("write log lock poisoned")
            .push((key.to_string(), value.to_string()));
    }

    #[allow(clippy::expect_used)] // Test mock; a poisoned lock means a test already failed
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.lock().expect("items lock poisoned").get(key).cloned()
    }

    #[allow(clippy::expect_used)] // Test mock; a poisoned lock means a test already failed
    fn remove_item(&self, key: &str) {
        self.items.lock().expect("items lock poisoned").remove(key);
    }
}

/// Middleware that records the kind of every envelope it inspects.
///
/// Install it on a store (usually last in the chain) and assert on
/// [`KindRecorder::kinds`] to observe the dispatch order, including the
/// synthetic envelopes the async stage injects.
#[derive(Debug)]
pub struct KindRecorder<K> {
    kinds: Arc<Mutex<Vec<K>>>,
}

impl<K> Clone for KindRecorder<K> {
    fn clone(&self) -> Self {
        Self {
            kinds: Arc::clone(&self.kinds),
        }
    }
}

impl<K> Default for KindRecorder<K> {
    fn default() -> Self {
        Self {
            kinds: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<K: Copy> KindRecorder<K> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded kinds, in dispatch order.
    #[must_use]
    #[allow(clippy::expect_used)] // Test mock; a poisoned lock means a test already failed
    pub fn kinds(&self) -> Vec<K> {
        self.kinds.lock().expect("kinds lock poisoned").clone()
    }

    /// Number of envelopes recorded so far.
    #[must_use]
    #[allow(clippy::expect_used)] // Test mock; a poisoned lock means a test already failed
    pub fn len(&self) -> usize {
        self.kinds.lock().expect("kinds lock poisoned").len()
    }

    /// True when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything recorded so far.
    #[allow(clippy::expect_used)] // Test mock; a poisoned lock means a test already failed
    pub fn clear(&self) {
        self.kinds.lock().expect("kinds lock poisoned").clear();
    }
}

impl<A, E> Middleware<A, E> for KindRecorder<A::Kind>
where
    A: Action,
{
    #[allow(clippy::expect_used)] // Test mock; a poisoned lock means a test already failed
    fn inspect(&self, action: &A, _env: &E) {
        self.kinds
            .lock()
            .expect("kinds lock poisoned")
            .push(action.kind());
    }
}

/// Settles a [`deferred`] payload from test code.
///
/// Dropping the handle without calling [`DeferredSettle::ok`] or
/// [`DeferredSettle::err`] settles the payload with a transport error, so a
/// forgotten handle cannot hang a test.
#[derive(Debug)]
pub struct DeferredSettle<T> {
    tx: oneshot::Sender<Result<T, ApiError>>,
}

impl<T> DeferredSettle<T> {
    /// Settle the payload successfully.
    pub fn ok(self, value: T) {
        let _ = self.tx.send(Ok(value));
    }

    /// Settle the payload with an error.
    pub fn err(self, error: ApiError) {
        let _ = self.tx.send(Err(error));
    }
}

/// A pending payload whose settlement the test controls.
///
/// Returns the settle handle and the payload to embed in an envelope. The
/// payload stays pending until the handle fires, which lets tests interleave
/// other dispatches (a navigation, say) before the settlement lands.
#[must_use]
pub fn deferred<T: Send + 'static>() -> (DeferredSettle<T>, Payload<T>) {
    let (tx, rx) = oneshot::channel();
    let payload = Payload::Pending(Box::pin(async move {
        match rx.await {
            Ok(result) => result,
            Err(_) => Err(ApiError::Transport("deferred payload dropped".to_string())),
        }
    }));
    (DeferredSettle { tx }, payload)
}

/// A pending payload that settles successfully as soon as it is awaited.
#[must_use]
pub fn pending_ok<T: Send + 'static>(value: T) -> Payload<T> {
    Payload::Pending(Box::pin(async move { Ok(value) }))
}

/// A pending payload that settles with `error` as soon as it is awaited.
#[must_use]
pub fn pending_err<T: Send + 'static>(error: ApiError) -> Payload<T> {
    Payload::Pending(Box::pin(async move { Err(error) }))
}
