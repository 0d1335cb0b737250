//! Credential mirror middleware.
//!
//! Keeps durable storage in sync with the session: a successful login or
//! register writes the token, logout writes the empty string. Every other
//! envelope, including failed attempts, writes nothing.

use crate::AppEnvironment;
use crate::action::AppAction;
use conduit_core::environment::CREDENTIAL_KEY;
use conduit_core::middleware::Middleware;
use conduit_core::payload::Payload;

/// Mirrors the credential token into the environment's durable store.
#[derive(Clone, Copy, Debug, Default)]
pub struct CredentialMirror;

impl Middleware<AppAction, AppEnvironment> for CredentialMirror {
    fn inspect(&self, action: &AppAction, env: &AppEnvironment) {
        match action {
            AppAction::Login {
                payload: Payload::Ok(response),
            }
            | AppAction::Register {
                payload: Payload::Ok(response),
            } => {
                tracing::debug!(username = %response.user.username, "mirroring credential token");
                env.credentials.set_item(CREDENTIAL_KEY, &response.user.token);
            }
            AppAction::Logout => {
                // Explicit clear, not a key deletion.
                env.credentials.set_item(CREDENTIAL_KEY, "");
            }
            _ => {}
        }
    }
}
