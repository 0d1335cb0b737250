//! The envelope abstraction: dispatched units of intent plus data.

use futures::future::BoxFuture;
use std::fmt;

/// Future that yields the settled version of an in-flight envelope.
pub type SettleFuture<A> = BoxFuture<'static, A>;

/// A dispatched envelope.
///
/// An envelope has an immutable kind drawn from a closed enumeration with
/// canonical wire names, and may carry a payload that is still in flight.
/// The store never mutates a dispatched envelope; the async dispatch stage
/// only produces derived ones (the lifecycle envelopes and the settled
/// re-dispatch).
pub trait Action: Send + Sized + 'static {
    /// Closed enumeration of envelope kinds. `Display` renders the
    /// canonical wire name.
    type Kind: Copy + Eq + fmt::Display + Send + Sync + 'static;

    /// The kind of this envelope.
    fn kind(&self) -> Self::Kind;

    /// Splits off a pending payload, if the envelope carries one.
    ///
    /// Settled envelopes (and envelopes without payloads) come back as
    /// [`Split::Settled`] and go straight to the reducers. In-flight
    /// envelopes come back as [`Split::InFlight`] and are swallowed by the
    /// async dispatch stage, which awaits the settle future and dispatches
    /// its result as a fresh envelope.
    fn split(self) -> Split<Self>;

    /// Synthesized lifecycle envelope announcing that `subtype` went async.
    fn async_start(subtype: Self::Kind) -> Self;

    /// Synthesized lifecycle envelope closing an async exchange.
    fn async_end() -> Self;
}

/// Outcome of [`Action::split`].
pub enum Split<A: Action> {
    /// The payload is settled or absent; reduce immediately.
    Settled(A),

    /// The payload is in flight.
    InFlight {
        /// Kind of the originating envelope, carried by `ASYNC_START`.
        subtype: A::Kind,
        /// Resolves to the settled envelope, success or failure. Rejections
        /// are converted to error-bearing envelopes inside this future; it
        /// never fails.
        settle: SettleFuture<A>,
    },
}
