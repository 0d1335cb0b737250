//! Middleware seam: observers in front of the reducers.

/// An inspect-then-forward stage in the dispatch pipeline.
///
/// Middleware sees every envelope on its way to the reducers and always
/// forwards; it may never swallow one. The only stage allowed to swallow an
/// envelope is the store's built-in async dispatch stage, so middleware is
/// observation-only by construction. Side effects (like mirroring the
/// credential token) are fine; transforming the envelope is not.
pub trait Middleware<A, E>: Send + Sync {
    /// Inspects an envelope before it reaches the reducers.
    fn inspect(&self, action: &A, env: &E);
}
