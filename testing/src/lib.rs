//! # Conduit Testing
//!
//! Testing utilities and helpers for the Conduit client state container.
//!
//! This crate provides:
//! - Mock implementations of environment traits
//! - A fluent reducer test harness
//! - Payload helpers for driving the async dispatch stage in tests
//!
//! ## Example
//!
//! ```ignore
//! use conduit_testing::mocks::MemoryCredentialStore;
//! use conduit_runtime::Store;
//!
//! #[tokio::test]
//! async fn test_login_flow() {
//!     let credentials = MemoryCredentialStore::new();
//!     let store = build_store(AppEnvironment::new(credentials.clone()));
//!
//!     let (handle, _) = store.dispatch(login_action("jwt.token.here")).await.unwrap();
//!     handle.wait().await;
//!
//!     assert_eq!(credentials.writes(), vec![("jwt".into(), "jwt.token.here".into())]);
//! }
//! ```

pub mod mocks;
pub mod reducer_test;

// Re-export commonly used items
pub use mocks::{DeferredSettle, KindRecorder, MemoryCredentialStore, deferred, pending_err, pending_ok};
pub use reducer_test::ReducerTest;

/// Initialize tracing for tests.
///
/// Safe to call from every test; only the first call installs a subscriber.
/// Respects `RUST_LOG` so individual runs can turn verbosity up.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}
