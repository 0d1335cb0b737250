//! Auth slice: the login and register forms.

use crate::AppEnvironment;
use crate::action::{AppAction, AuthField, Kind};
use conduit_core::payload::FieldErrors;
use conduit_core::reducer::Reducer;

/// State backing the login and register forms.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    /// Email input.
    pub email: String,
    /// Password input.
    pub password: String,
    /// Username input (register form only).
    pub username: String,
    /// True between `ASYNC_START` and the settled login/register envelope.
    pub in_progress: bool,
    /// Field errors from the last failed attempt, verbatim from the server.
    pub errors: Option<FieldErrors>,
}

/// Reducer for [`AuthState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthReducer;

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action, _env: &Self::Environment) {
        match action {
            AppAction::Login { payload } | AppAction::Register { payload } => {
                state.in_progress = false;
                state.errors = payload.errors().cloned();
            }
            AppAction::LoginPageUnloaded | AppAction::RegisterPageUnloaded => {
                *state = Self::State::default();
            }
            AppAction::AsyncStart { subtype } if matches!(subtype, Kind::Login | Kind::Register) => {
                state.in_progress = true;
            }
            AppAction::UpdateFieldAuth { field, value } => match field {
                AuthField::Email => state.email = value.clone(),
                AuthField::Password => state.password = value.clone(),
                AuthField::Username => state.username = value.clone(),
            },
            _ => {}
        }
    }
}
