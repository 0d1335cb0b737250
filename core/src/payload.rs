//! Payload union for dispatched envelopes.
//!
//! The original client sniffed payloads for a `.then` method at runtime.
//! Here the distinction is a discriminated union: a payload is either still
//! in flight, settled successfully, or settled with a structured error body.
//! The async dispatch stage pattern-matches on the variant instead of
//! duck-typing.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Boxed future for a request that eventually settles to a response body or
/// a structured error.
pub type ApiFuture<T> = BoxFuture<'static, Result<T, ApiError>>;

/// Field-error mapping surfaced by the API: field name → human-readable
/// messages. Reducers store this verbatim for display and never interpret it.
pub type FieldErrors = HashMap<String, Vec<String>>;

/// Structured error body carried by failed envelopes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Field name → messages, stored verbatim.
    pub errors: FieldErrors,
}

impl ErrorBody {
    /// Creates an error body from a field-error mapping.
    #[must_use]
    pub const fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Creates an error body with a single field and message.
    #[must_use]
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(field.into(), vec![message.into()]);
        Self { errors }
    }

    /// Fallback shape for rejections that lack the expected structure.
    #[must_use]
    pub fn unknown() -> Self {
        Self::single("error", "an unknown error occurred")
    }
}

/// Error produced by the network collaborator when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a structured validation failure, shaped
    /// `{ response: { body: { errors: field → messages } } }` on the wire.
    #[error("request rejected by server")]
    Response {
        /// The structured error body.
        body: ErrorBody,
    },

    /// The request failed before a structured body was produced.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ApiError {
    /// The structured body reducers will store. Failures without the
    /// expected structure collapse to the generic unknown-error shape
    /// rather than propagating a raw exception.
    #[must_use]
    pub fn into_body(self) -> ErrorBody {
        match self {
            Self::Response { body } => body,
            Self::Transport(_) => ErrorBody::unknown(),
        }
    }
}

/// An envelope payload: in flight, settled successfully, or settled with a
/// structured error.
pub enum Payload<T> {
    /// The request was dispatched but has not settled yet.
    Pending(ApiFuture<T>),

    /// Settled successfully.
    Ok(T),

    /// Settled with a structured error body.
    Err(ErrorBody),
}

impl<T> Payload<T> {
    /// Whether the payload is still in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Whether the payload settled with an error (the envelope's `error`
    /// flag in the original wire format).
    #[must_use]
    pub const fn is_err(&self) -> bool {
        matches!(self, Self::Err(_))
    }

    /// The settled value, if any.
    #[must_use]
    pub const fn ok(&self) -> Option<&T> {
        match self {
            Self::Ok(value) => Some(value),
            _ => None,
        }
    }

    /// The settled field errors, if any.
    #[must_use]
    pub const fn errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Err(body) => Some(&body.errors),
            _ => None,
        }
    }
}

// Manual Debug since the pending future has nothing useful to show.
impl<T> fmt::Debug for Payload<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending(_) => f.write_str("Payload::Pending(<in flight>)"),
            Self::Ok(value) => f.debug_tuple("Payload::Ok").field(value).finish(),
            Self::Err(body) => f.debug_tuple("Payload::Err").field(body).finish(),
        }
    }
}
