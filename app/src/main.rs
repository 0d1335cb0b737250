//! Demo entry point: wires a store, runs a login round trip and a home
//! page load against a stubbed API, then shuts down.

use anyhow::Result;
use conduit_app::model::{HomeFeed, User, UserResponse};
use conduit_app::{AppAction, AppEnvironment, build_store};
use conduit_core::environment::{CREDENTIAL_KEY, CredentialStore};
use conduit_core::payload::Payload;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Process-local stand-in for the browser's durable storage.
#[derive(Debug, Default)]
struct LocalStorage {
    items: Mutex<HashMap<String, String>>,
}

impl CredentialStore for LocalStorage {
    fn set_item(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .ok()
            .and_then(|items| items.get(key).cloned())
    }

    fn remove_item(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}

/// Stubbed login request: settles after a short delay, like a fast network.
fn fake_login(email: &str) -> Payload<UserResponse> {
    let email = email.to_string();
    Payload::Pending(Box::pin(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(UserResponse {
            user: User {
                username: "demo".to_string(),
                token: "demo.jwt.token".to_string(),
                email,
                bio: None,
                image: None,
            },
        })
    }))
}

/// Stubbed home feed request.
fn fake_home_feed() -> Payload<HomeFeed> {
    Payload::Pending(Box::pin(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(HomeFeed {
            tags: vec!["rust".to_string(), "tokio".to_string()],
            page: conduit_app::model::ArticleListPage::default(),
        })
    }))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let storage = LocalStorage::default();
    let environment = AppEnvironment::new(storage);
    let store = build_store(environment.clone());

    store
        .dispatch(AppAction::UpdateFieldAuth {
            field: conduit_app::AuthField::Email,
            value: "demo@example.com".to_string(),
        })
        .await?;

    tracing::info!("dispatching login");
    let mut handle = store
        .dispatch(AppAction::Login {
            payload: fake_login("demo@example.com"),
        })
        .await?;
    handle.wait().await;

    let email = store.state(|s| s.auth.email.clone()).await;
    let token = environment.credentials.get_item(CREDENTIAL_KEY);
    tracing::info!(%email, token = token.as_deref().unwrap_or(""), "login settled");

    tracing::info!("loading the home page");
    let mut handle = store
        .dispatch(AppAction::HomePageLoaded {
            tab: Some("all".to_string()),
            payload: Some(fake_home_feed()),
        })
        .await?;
    handle.wait().await;

    let tags = store.state(|s| s.article_list.tags.clone()).await;
    tracing::info!(?tags, "home page settled");

    store.dispatch(AppAction::Logout).await?;
    let token = environment.credentials.get_item(CREDENTIAL_KEY);
    tracing::info!(token = token.as_deref().unwrap_or("<unset>"), "logged out");

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
