//! The Reducer trait — pure state-transition logic, one reducer per slice.

/// A pure, total fold of one envelope into a state slice.
///
/// # Type Parameters
///
/// - `State`: the slice this reducer owns
/// - `Action`: the envelope type it processes
/// - `Environment`: injected dependencies
///
/// # Contract
///
/// - Envelope kinds the reducer does not recognize must leave `state`
///   untouched.
/// - Page-loaded kinds with an absent payload initialize the slice to its
///   empty defaults rather than failing.
/// - Reducers perform no I/O; async work enters the system as pending
///   payloads on dispatched envelopes, never as reducer output.
///
/// The envelope is taken by reference because every slice reducer in a
/// composition sees the same envelope.
pub trait Reducer {
    /// The state slice this reducer operates on.
    type State;

    /// The envelope type this reducer processes.
    type Action;

    /// The environment type with injected dependencies.
    type Environment;

    /// Folds `action` into `state`.
    fn reduce(&self, state: &mut Self::State, action: &Self::Action, env: &Self::Environment);
}
