//! # Conduit App
//!
//! The Conduit client state container: the aggregate state tree, the
//! envelope vocabulary, the slice reducers, and the credential mirror,
//! wired onto the store runtime.
//!
//! ## Example
//!
//! ```ignore
//! use conduit_app::{AppAction, AppEnvironment, build_store};
//!
//! let store = build_store(AppEnvironment::new(credentials));
//! let handle = store.dispatch(AppAction::Login { payload }).await?;
//! handle.wait().await;
//! let email = store.state(|s| s.auth.email.clone()).await;
//! ```

pub mod action;
pub mod article_list;
pub mod auth;
pub mod editor;
pub mod middleware;
pub mod model;

pub use action::{AppAction, AuthField, EditorField, Kind, UnknownField};
pub use article_list::{ArticleListReducer, ArticleListState};
pub use auth::{AuthReducer, AuthState};
pub use editor::{EditorReducer, EditorState};
pub use middleware::CredentialMirror;

use conduit_core::composition::{CombinedReducer, combine_reducers, scope_reducer};
use conduit_core::environment::CredentialStore;
use conduit_runtime::Store;
use std::sync::Arc;

/// The aggregate state tree, one field per UI slice.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    /// Home feed, pager, tabs, and tag filter.
    pub article_list: ArticleListState,
    /// Login and register forms.
    pub auth: AuthState,
    /// Article editor form.
    pub editor: EditorState,
}

/// Injected dependencies shared by reducers and middleware.
#[derive(Clone)]
pub struct AppEnvironment {
    /// Durable storage the credential mirror writes to.
    pub credentials: Arc<dyn CredentialStore>,
}

impl AppEnvironment {
    /// Wraps a credential store into an environment.
    pub fn new(credentials: impl CredentialStore + 'static) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment").finish_non_exhaustive()
    }
}

/// The aggregate reducer type produced by [`app_reducer`].
pub type AppReducer = CombinedReducer<AppState, AppAction, AppEnvironment>;

/// A fully wired store over the aggregate state.
pub type AppStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

/// Composes the slice reducers into the aggregate reducer.
///
/// Each slice reducer sees only its own field; envelope kinds it does not
/// recognize leave its slice untouched.
#[must_use]
pub fn app_reducer() -> AppReducer {
    combine_reducers(vec![
        Box::new(scope_reducer(ArticleListReducer, |state: &mut AppState| {
            &mut state.article_list
        })),
        Box::new(scope_reducer(AuthReducer, |state: &mut AppState| {
            &mut state.auth
        })),
        Box::new(scope_reducer(EditorReducer, |state: &mut AppState| {
            &mut state.editor
        })),
    ])
}

/// Builds the store with the default middleware chain installed.
///
/// Currently that is just the [`CredentialMirror`]; it inspects every
/// envelope before the reducers run.
#[must_use]
pub fn build_store(environment: AppEnvironment) -> AppStore {
    Store::with_middlewares(
        AppState::default(),
        app_reducer(),
        environment,
        vec![Box::new(CredentialMirror)],
    )
}
