//! # Conduit Core
//!
//! Core traits and types for the Conduit client state container.
//!
//! This crate provides the vocabulary the rest of the workspace is built
//! from: the envelope abstraction, the payload union, the reducer and
//! middleware seams, and the environment traits for injected dependencies.
//!
//! ## Core Concepts
//!
//! - **Action**: a dispatched envelope of intent plus data. Its payload may
//!   still be in flight when it is dispatched.
//! - **Payload**: a discriminated union — `Pending` (a boxed future),
//!   `Ok` (a settled response body), or `Err` (a structured error body).
//! - **Reducer**: pure function `(State, &Action, Environment) → State`,
//!   one per UI slice, composed into a single aggregate reducer.
//! - **Middleware**: inspect-then-forward observers sitting in front of the
//!   reducers (e.g. the credential mirror).
//! - **Environment**: injected dependencies behind traits, such as the
//!   durable credential store.
//!
//! ## Architecture Principles
//!
//! - Unidirectional data flow: every state transition goes through dispatch.
//! - Slices are independent; no slice depends on another slice's shape.
//! - All failures become data (error-bearing envelopes) before they reach
//!   the reducer layer; no exception crosses the middleware boundary.
//!
//! ## Example
//!
//! ```ignore
//! use conduit_core::{Action, Payload, Reducer, Split};
//!
//! #[derive(Clone, Debug, Default)]
//! struct CounterState {
//!     value: u32,
//! }
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(&self, state: &mut CounterState, action: &CounterAction, _env: &()) {
//!         if let CounterAction::Loaded { payload: Payload::Ok(value) } = action {
//!             state.value = *value;
//!         }
//!     }
//! }
//! ```

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};

pub mod action;
pub mod composition;
pub mod environment;
pub mod middleware;
pub mod payload;
pub mod reducer;

pub use action::{Action, SettleFuture, Split};
pub use environment::{CREDENTIAL_KEY, CredentialStore};
pub use middleware::Middleware;
pub use payload::{ApiError, ApiFuture, ErrorBody, FieldErrors, Payload};
pub use reducer::Reducer;
