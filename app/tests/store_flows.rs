//! End-to-end flows through the wired store: auth round trips, the
//! credential mirror, feed navigation, and stale-response suppression.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code

use conduit_app::model::{Article, ArticleListPage, ArticleResponse, HomeFeed, User, UserResponse};
use conduit_app::{
    AppAction, AppEnvironment, AppState, CredentialMirror, Kind, app_reducer, build_store,
};
use conduit_core::environment::{CREDENTIAL_KEY, CredentialStore};
use conduit_core::payload::{ApiError, ErrorBody, Payload};
use conduit_runtime::Store;
use conduit_testing::mocks::{KindRecorder, MemoryCredentialStore, deferred, pending_err, pending_ok};
use std::sync::Arc;

fn user_response(token: &str) -> UserResponse {
    UserResponse {
        user: User {
            username: "alice".to_string(),
            token: token.to_string(),
            email: "alice@example.com".to_string(),
            bio: None,
            image: None,
        },
    }
}

fn article(slug: &str) -> Article {
    let json = serde_json::json!({
        "slug": slug,
        "title": slug,
        "description": "",
        "body": "",
        "tagList": [],
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-01T12:00:00Z",
        "favorited": false,
        "favoritesCount": 0,
        "author": { "username": "author", "bio": null, "image": null, "following": false },
    });
    serde_json::from_value(json).expect("fixture article should deserialize")
}

fn page(slugs: &[&str], total: u64) -> ArticleListPage {
    ArticleListPage {
        articles: slugs.iter().map(|s| article(s)).collect(),
        articles_count: total,
    }
}

/// Store with the default chain plus a kind recorder at the end.
fn observed_store(
    credentials: MemoryCredentialStore,
) -> (
    Store<
        AppState,
        AppAction,
        AppEnvironment,
        conduit_app::AppReducer,
    >,
    KindRecorder<Kind>,
) {
    let recorder = KindRecorder::new();
    let store = Store::with_middlewares(
        AppState::default(),
        app_reducer(),
        AppEnvironment::new(credentials),
        vec![Box::new(CredentialMirror), Box::new(recorder.clone())],
    );
    (store, recorder)
}

#[tokio::test]
async fn successful_login_mirrors_the_token_once() {
    let credentials = MemoryCredentialStore::new();
    let store = build_store(AppEnvironment::new(credentials.clone()));

    let mut handle = store
        .dispatch(AppAction::Login {
            payload: pending_ok(user_response("jwt.token.value")),
        })
        .await
        .expect("dispatch should succeed");
    handle.wait().await;

    assert_eq!(
        credentials.writes(),
        vec![(CREDENTIAL_KEY.to_string(), "jwt.token.value".to_string())]
    );
    let auth = store.state(|s| s.auth.clone()).await;
    assert!(!auth.in_progress);
    assert!(auth.errors.is_none());
}

#[tokio::test]
async fn failed_login_stores_errors_and_writes_nothing() {
    let credentials = MemoryCredentialStore::new();
    let store = build_store(AppEnvironment::new(credentials.clone()));

    let mut handle = store
        .dispatch(AppAction::Login {
            payload: pending_err(ApiError::Response {
                body: ErrorBody::single("email or password", "is invalid"),
            }),
        })
        .await
        .expect("dispatch should succeed");
    handle.wait().await;

    assert_eq!(credentials.write_count(), 0);
    let auth = store.state(|s| s.auth.clone()).await;
    assert!(!auth.in_progress);
    assert_eq!(
        auth.errors.as_ref().and_then(|e| e.get("email or password")),
        Some(&vec!["is invalid".to_string()])
    );
}

#[tokio::test]
async fn logout_clears_the_mirrored_token() {
    let credentials = MemoryCredentialStore::new();
    let store = build_store(AppEnvironment::new(credentials.clone()));

    let mut handle = store
        .dispatch(AppAction::Login {
            payload: pending_ok(user_response("jwt.token.value")),
        })
        .await
        .expect("dispatch should succeed");
    handle.wait().await;

    store
        .dispatch(AppAction::Logout)
        .await
        .expect("dispatch should succeed");

    assert_eq!(credentials.get_item(CREDENTIAL_KEY).as_deref(), Some(""));
    assert_eq!(credentials.write_count(), 2);
}

#[tokio::test]
async fn login_lifecycle_marks_in_progress_while_in_flight() {
    let credentials = MemoryCredentialStore::new();
    let (store, recorder) = observed_store(credentials);
    let (settle, payload) = deferred::<UserResponse>();

    let mut handle = store
        .dispatch(AppAction::Login { payload })
        .await
        .expect("dispatch should succeed");

    assert!(store.state(|s| s.auth.in_progress).await);
    assert_eq!(recorder.kinds(), vec![Kind::AsyncStart]);

    settle.ok(user_response("jwt.token.value"));
    handle.wait().await;

    assert!(!store.state(|s| s.auth.in_progress).await);
    assert_eq!(
        recorder.kinds(),
        vec![Kind::AsyncStart, Kind::AsyncEnd, Kind::Login]
    );
}

#[tokio::test]
async fn home_page_load_fills_the_feed() {
    let credentials = MemoryCredentialStore::new();
    let store = build_store(AppEnvironment::new(credentials));

    let mut handle = store
        .dispatch(AppAction::HomePageLoaded {
            tab: Some("all".to_string()),
            payload: Some(pending_ok(HomeFeed {
                tags: vec!["rust".to_string()],
                page: page(&["first-post", "second-post"], 2),
            })),
        })
        .await
        .expect("dispatch should succeed");
    handle.wait().await;

    let list = store.state(|s| s.article_list.clone()).await;
    assert_eq!(list.tags, vec!["rust"]);
    assert_eq!(list.articles.len(), 2);
    assert_eq!(list.tab.as_deref(), Some("all"));
    assert_eq!(list.current_page, 0);
}

#[tokio::test]
async fn favorite_keeps_untouched_articles_pointer_identical() {
    let credentials = MemoryCredentialStore::new();
    let store = build_store(AppEnvironment::new(credentials));

    let mut handle = store
        .dispatch(AppAction::HomePageLoaded {
            tab: None,
            payload: Some(pending_ok(HomeFeed {
                tags: Vec::new(),
                page: page(&["keep-me", "favorite-me"], 2),
            })),
        })
        .await
        .expect("dispatch should succeed");
    handle.wait().await;

    let (untouched, target) = store
        .state(|s| {
            (
                Arc::clone(&s.article_list.articles[0]),
                Arc::clone(&s.article_list.articles[1]),
            )
        })
        .await;

    let mut updated = article("favorite-me");
    updated.favorited = true;
    updated.favorites_count = 3;
    let mut handle = store
        .dispatch(AppAction::ArticleFavorited {
            payload: pending_ok(ArticleResponse { article: updated }),
        })
        .await
        .expect("dispatch should succeed");
    handle.wait().await;

    let articles = store.state(|s| s.article_list.articles.clone()).await;
    assert!(Arc::ptr_eq(&articles[0], &untouched));
    assert!(!Arc::ptr_eq(&articles[1], &target));
    assert!(articles[1].favorited);
    assert_eq!(articles[1].favorites_count, 3);
}

#[tokio::test]
async fn navigating_away_drops_the_stale_page() {
    let credentials = MemoryCredentialStore::new();
    let (store, recorder) = observed_store(credentials);
    let (settle, payload) = deferred::<ArticleListPage>();

    let mut handle = store
        .dispatch(AppAction::SetPage { page: 3, payload })
        .await
        .expect("dispatch should succeed");

    // Leaving the page moves the view generation.
    store.note_view_change();
    settle.ok(page(&["too-late"], 1));
    handle.wait().await;

    let list = store.state(|s| s.article_list.clone()).await;
    assert!(list.articles.is_empty());
    assert_eq!(list.current_page, 0);
    assert_eq!(recorder.kinds(), vec![Kind::AsyncStart]);
}

#[tokio::test]
async fn tag_filter_resets_deep_pagination() {
    let credentials = MemoryCredentialStore::new();
    let store = build_store(AppEnvironment::new(credentials));

    let mut handle = store
        .dispatch(AppAction::SetPage {
            page: 5,
            payload: pending_ok(page(&["deep-post"], 60)),
        })
        .await
        .expect("dispatch should succeed");
    handle.wait().await;
    assert_eq!(store.state(|s| s.article_list.current_page).await, 5);

    let mut handle = store
        .dispatch(AppAction::ApplyTagFilter {
            tag: "rust".to_string(),
            payload: pending_ok(page(&["tagged-post"], 4)),
        })
        .await
        .expect("dispatch should succeed");
    handle.wait().await;

    let list = store.state(|s| s.article_list.clone()).await;
    assert_eq!(list.current_page, 0);
    assert_eq!(list.tag.as_deref(), Some("rust"));
    assert!(list.tab.is_none());
    assert_eq!(list.articles[0].slug, "tagged-post");
}
