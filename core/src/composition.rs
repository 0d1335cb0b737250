//! Reducer composition utilities.
//!
//! Two composition shapes cover the slice layout:
//! - **`scope_reducer`**: focus a slice reducer onto a field of the
//!   aggregate state.
//! - **`combine_reducers`**: run several (typically scoped) reducers over
//!   the same envelope in sequence.
//!
//! Slices stay siloed: each scoped reducer only ever sees its own field of
//! the aggregate, so no slice can depend on another slice's shape.

use crate::reducer::Reducer;
use std::sync::Arc;

/// Boxed reducer trait object used by [`combine_reducers`].
pub type BoxReducer<S, A, E> =
    Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>;

/// Combines reducers that operate on the same state and envelope types.
///
/// Each reducer runs in sequence over the same envelope. Reducers that do
/// not recognize the envelope's kind leave the state untouched, so order
/// only matters when two reducers claim the same kind (which the slice
/// layout never does).
///
/// # Examples
///
/// ```
/// use conduit_core::Reducer;
/// use conduit_core::composition::{combine_reducers, scope_reducer};
///
/// #[derive(Clone, Default)]
/// struct AppState {
///     counter: i32,
///     name: String,
/// }
///
/// #[derive(Clone)]
/// enum AppAction {
///     Increment,
///     SetName(String),
/// }
///
/// struct CounterReducer;
///
/// impl Reducer for CounterReducer {
///     type State = i32;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut i32, action: &AppAction, _env: &()) {
///         if matches!(action, AppAction::Increment) {
///             *state += 1;
///         }
///     }
/// }
///
/// struct NameReducer;
///
/// impl Reducer for NameReducer {
///     type State = String;
///     type Action = AppAction;
///     type Environment = ();
///
///     fn reduce(&self, state: &mut String, action: &AppAction, _env: &()) {
///         if let AppAction::SetName(name) = action {
///             *state = name.clone();
///         }
///     }
/// }
///
/// let combined = combine_reducers(vec![
///     Box::new(scope_reducer(CounterReducer, |s: &mut AppState| &mut s.counter)),
///     Box::new(scope_reducer(NameReducer, |s: &mut AppState| &mut s.name)),
/// ]);
///
/// let mut state = AppState::default();
/// combined.reduce(&mut state, &AppAction::Increment, &());
/// assert_eq!(state.counter, 1);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(reducers: Vec<BoxReducer<S, A, E>>) -> CombinedReducer<S, A, E> {
    CombinedReducer {
        reducers: reducers.into(),
    }
}

/// A reducer that runs several reducers in sequence.
///
/// Created by [`combine_reducers`]. Cheap to clone; the composition is
/// shared, which is what the store's dispatch pipeline needs when it hands
/// itself to spawned settle tasks.
pub struct CombinedReducer<S, A, E> {
    reducers: Arc<[BoxReducer<S, A, E>]>,
}

impl<S, A, E> Clone for CombinedReducer<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            reducers: Arc::clone(&self.reducers),
        }
    }
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E> {
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(&self, state: &mut S, action: &A, env: &E) {
        for reducer in self.reducers.iter() {
            reducer.reduce(state, action, env);
        }
    }
}

/// Scopes a reducer onto a field of a larger state.
///
/// The lens is a plain function pointer from the aggregate to the slice,
/// so a non-capturing closure works:
///
/// ```ignore
/// scope_reducer(AuthReducer, |state: &mut AppState| &mut state.auth)
/// ```
pub const fn scope_reducer<S, R>(
    reducer: R,
    lens: fn(&mut S) -> &mut R::State,
) -> ScopedReducer<S, R>
where
    R: Reducer,
{
    ScopedReducer { reducer, lens }
}

/// A reducer focused on a subset of a larger state.
///
/// Created by [`scope_reducer`].
pub struct ScopedReducer<S, R>
where
    R: Reducer,
{
    reducer: R,
    lens: fn(&mut S) -> &mut R::State,
}

impl<S, R> Clone for ScopedReducer<S, R>
where
    R: Reducer + Clone,
{
    fn clone(&self) -> Self {
        Self {
            reducer: self.reducer.clone(),
            lens: self.lens,
        }
    }
}

impl<S, R> Reducer for ScopedReducer<S, R>
where
    R: Reducer,
{
    type State = S;
    type Action = R::Action;
    type Environment = R::Environment;

    fn reduce(&self, state: &mut S, action: &Self::Action, env: &Self::Environment) {
        self.reducer.reduce((self.lens)(state), action, env);
    }
}
