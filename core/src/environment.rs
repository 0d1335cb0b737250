//! Environment traits — injected dependencies for reducers and middleware.

/// Fixed key under which the credential token is mirrored.
pub const CREDENTIAL_KEY: &str = "jwt";

/// Durable key-value storage outliving a single session.
///
/// Used only to mirror the credential token under [`CREDENTIAL_KEY`]; the
/// token is not part of the state tree. An empty string signals "no
/// credential" — logout writes `""` rather than deleting the key.
///
/// The methods are infallible by signature: store unavailability is an
/// external-collaborator concern and is not modeled here.
///
/// # Examples
///
/// ```
/// use conduit_core::environment::{CREDENTIAL_KEY, CredentialStore};
/// use std::collections::HashMap;
/// use std::sync::Mutex;
///
/// #[derive(Default)]
/// struct MapStore(Mutex<HashMap<String, String>>);
///
/// impl CredentialStore for MapStore {
///     fn set_item(&self, key: &str, value: &str) {
///         if let Ok(mut items) = self.0.lock() {
///             items.insert(key.to_string(), value.to_string());
///         }
///     }
///     fn get_item(&self, key: &str) -> Option<String> {
///         self.0.lock().ok().and_then(|items| items.get(key).cloned())
///     }
///     fn remove_item(&self, key: &str) {
///         if let Ok(mut items) = self.0.lock() {
///             items.remove(key);
///         }
///     }
/// }
///
/// let store = MapStore::default();
/// store.set_item(CREDENTIAL_KEY, "abc123");
/// assert_eq!(store.get_item(CREDENTIAL_KEY).as_deref(), Some("abc123"));
/// ```
pub trait CredentialStore: Send + Sync {
    /// Writes `value` under `key`.
    fn set_item(&self, key: &str, value: &str);

    /// Reads the value stored under `key`.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Removes `key` entirely.
    fn remove_item(&self, key: &str);
}
