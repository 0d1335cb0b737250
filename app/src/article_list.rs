//! Article list slice: the home feed, pagination, tab, and tag filter.

use crate::AppEnvironment;
use crate::action::AppAction;
use crate::model::{Article, ArticleListPage};
use conduit_core::payload::Payload;
use conduit_core::reducer::Reducer;
use std::sync::Arc;

/// State backing the home feed and its pager.
///
/// Articles are shared pointers: a favorite toggle replaces only the
/// affected article, so views holding the others can skip re-rendering on
/// pointer equality.
#[derive(Clone, Debug, Default)]
pub struct ArticleListState {
    /// The current page of articles.
    pub articles: Vec<Arc<Article>>,
    /// Total article count across all pages.
    pub articles_count: u64,
    /// Zero-based page index.
    pub current_page: u64,
    /// Popular tags for the sidebar.
    pub tags: Vec<String>,
    /// Active feed tab, if any.
    pub tab: Option<String>,
    /// Active tag filter, if any. Mutually exclusive with `tab`.
    pub tag: Option<String>,
}

/// Reducer for [`ArticleListState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ArticleListReducer;

/// Articles and count from a settled page payload. Error payloads render as
/// an empty listing rather than surfacing here; the auth and editor slices
/// own error display.
fn page_fields(payload: &Payload<ArticleListPage>) -> (Vec<Arc<Article>>, u64) {
    match payload.ok() {
        Some(page) => (
            page.articles.iter().cloned().map(Arc::new).collect(),
            page.articles_count,
        ),
        None => (Vec::new(), 0),
    }
}

/// Replaces the article matching the response's slug, copying only the
/// favorite fields onto it. Every other entry keeps its pointer.
fn toggle_favorite(articles: &mut [Arc<Article>], updated: &Article) {
    for entry in articles.iter_mut() {
        if entry.slug == updated.slug {
            *entry = Arc::new(Article {
                favorited: updated.favorited,
                favorites_count: updated.favorites_count,
                ..(**entry).clone()
            });
        }
    }
}

impl Reducer for ArticleListReducer {
    type State = ArticleListState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action, _env: &Self::Environment) {
        match action {
            AppAction::ArticleFavorited { payload } | AppAction::ArticleUnfavorited { payload } => {
                if let Some(response) = payload.ok() {
                    toggle_favorite(&mut state.articles, &response.article);
                }
            }
            AppAction::SetPage { page, payload } => {
                let (articles, count) = page_fields(payload);
                state.articles = articles;
                state.articles_count = count;
                state.current_page = *page;
            }
            AppAction::ApplyTagFilter { tag, payload } => {
                let (articles, count) = page_fields(payload);
                state.articles = articles;
                state.articles_count = count;
                state.tag = Some(tag.clone());
                state.tab = None;
                state.current_page = 0;
            }
            AppAction::ChangeTab { tab, payload } => {
                let (articles, count) = page_fields(payload);
                state.articles = articles;
                state.articles_count = count;
                state.tab = Some(tab.clone());
                state.tag = None;
                state.current_page = 0;
            }
            AppAction::HomePageLoaded { tab, payload } => {
                let feed = payload.as_ref().and_then(Payload::ok);
                state.tags = feed.map(|f| f.tags.clone()).unwrap_or_default();
                let (articles, count) = match feed {
                    Some(feed) => (
                        feed.page.articles.iter().cloned().map(Arc::new).collect(),
                        feed.page.articles_count,
                    ),
                    None => (Vec::new(), 0),
                };
                state.articles = articles;
                state.articles_count = count;
                state.current_page = 0;
                state.tab = tab.clone();
            }
            AppAction::HomePageUnloaded => *state = Self::State::default(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::model::{ArticleResponse, HomeFeed};
    use crate::test_support::test_environment;
    use conduit_testing::ReducerTest;

    fn loaded_state(slugs: &[&str]) -> ArticleListState {
        ArticleListState {
            articles: slugs.iter().map(|s| Arc::new(fixtures::article(s))).collect(),
            articles_count: slugs.len() as u64,
            ..ArticleListState::default()
        }
    }

    #[test]
    fn home_page_loaded_fills_tags_articles_and_tab() {
        ReducerTest::new(ArticleListReducer)
            .with_env(test_environment())
            .given_state(ArticleListState::default())
            .when_action(AppAction::HomePageLoaded {
                tab: Some("all".to_string()),
                payload: Some(Payload::Ok(HomeFeed {
                    tags: vec!["rust".to_string(), "testing".to_string()],
                    page: fixtures::page(&["first-post"], 42),
                })),
            })
            .then_state(|state| {
                assert_eq!(state.tags, vec!["rust", "testing"]);
                assert_eq!(state.articles.len(), 1);
                assert_eq!(state.articles_count, 42);
                assert_eq!(state.current_page, 0);
                assert_eq!(state.tab.as_deref(), Some("all"));
            })
            .run();
    }

    #[test]
    fn home_page_loaded_without_payload_still_sets_the_tab() {
        ReducerTest::new(ArticleListReducer)
            .with_env(test_environment())
            .given_state(loaded_state(&["old-post"]))
            .when_action(AppAction::HomePageLoaded {
                tab: Some("feed".to_string()),
                payload: None,
            })
            .then_state(|state| {
                assert!(state.articles.is_empty());
                assert_eq!(state.articles_count, 0);
                assert_eq!(state.tab.as_deref(), Some("feed"));
            })
            .run();
    }

    #[test]
    fn home_page_unloaded_resets_the_slice() {
        ReducerTest::new(ArticleListReducer)
            .with_env(test_environment())
            .given_state(ArticleListState {
                tab: Some("all".to_string()),
                current_page: 3,
                ..loaded_state(&["a", "b"])
            })
            .when_action(AppAction::HomePageUnloaded)
            .then_state(|state| {
                assert!(state.articles.is_empty());
                assert_eq!(state.current_page, 0);
                assert!(state.tab.is_none());
            })
            .run();
    }

    #[test]
    fn set_page_swaps_articles_and_keeps_the_filter() {
        ReducerTest::new(ArticleListReducer)
            .with_env(test_environment())
            .given_state(ArticleListState {
                tag: Some("rust".to_string()),
                ..loaded_state(&["page-one-post"])
            })
            .when_action(AppAction::SetPage {
                page: 2,
                payload: Payload::Ok(fixtures::page(&["page-three-post"], 25)),
            })
            .then_state(|state| {
                assert_eq!(state.current_page, 2);
                assert_eq!(state.articles[0].slug, "page-three-post");
                assert_eq!(state.articles_count, 25);
                assert_eq!(state.tag.as_deref(), Some("rust"));
            })
            .run();
    }

    #[test]
    fn apply_tag_filter_resets_page_and_clears_tab() {
        ReducerTest::new(ArticleListReducer)
            .with_env(test_environment())
            .given_state(ArticleListState {
                tab: Some("all".to_string()),
                current_page: 5,
                ..loaded_state(&["stale"])
            })
            .when_action(AppAction::ApplyTagFilter {
                tag: "rust".to_string(),
                payload: Payload::Ok(fixtures::page(&["tagged-post"], 3)),
            })
            .then_state(|state| {
                assert_eq!(state.tag.as_deref(), Some("rust"));
                assert!(state.tab.is_none());
                assert_eq!(state.current_page, 0);
                assert_eq!(state.articles[0].slug, "tagged-post");
            })
            .run();
    }

    #[test]
    fn change_tab_resets_page_and_clears_tag_filter() {
        ReducerTest::new(ArticleListReducer)
            .with_env(test_environment())
            .given_state(ArticleListState {
                tag: Some("rust".to_string()),
                current_page: 4,
                ..loaded_state(&["stale"])
            })
            .when_action(AppAction::ChangeTab {
                tab: "feed".to_string(),
                payload: Payload::Ok(fixtures::page(&["feed-post"], 1)),
            })
            .then_state(|state| {
                assert_eq!(state.tab.as_deref(), Some("feed"));
                assert!(state.tag.is_none());
                assert_eq!(state.current_page, 0);
                assert_eq!(state.articles[0].slug, "feed-post");
            })
            .run();
    }

    #[test]
    fn favorite_updates_only_the_matching_article() {
        let reducer = ArticleListReducer;
        let mut state = loaded_state(&["keep-me", "favorite-me"]);
        let untouched = Arc::clone(&state.articles[0]);
        let target = Arc::clone(&state.articles[1]);

        let mut updated = fixtures::article("favorite-me");
        updated.favorited = true;
        updated.favorites_count = 8;

        reducer.reduce(
            &mut state,
            &AppAction::ArticleFavorited {
                payload: Payload::Ok(ArticleResponse { article: updated }),
            },
            &test_environment(),
        );

        assert!(Arc::ptr_eq(&state.articles[0], &untouched));
        assert!(!Arc::ptr_eq(&state.articles[1], &target));
        assert!(state.articles[1].favorited);
        assert_eq!(state.articles[1].favorites_count, 8);
        // The rest of the article came from the list entry, not the response.
        assert_eq!(state.articles[1].title, target.title);
    }

    #[test]
    fn favorite_error_payload_changes_nothing() {
        let reducer = ArticleListReducer;
        let mut state = loaded_state(&["only-post"]);
        let before = Arc::clone(&state.articles[0]);

        reducer.reduce(
            &mut state,
            &AppAction::ArticleFavorited {
                payload: Payload::Err(conduit_core::payload::ErrorBody::unknown()),
            },
            &test_environment(),
        );

        assert!(Arc::ptr_eq(&state.articles[0], &before));
    }
}
