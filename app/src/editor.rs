//! Editor slice: the article create/edit form.

use crate::AppEnvironment;
use crate::action::{AppAction, EditorField, Kind};
use crate::model::TagList;
use conduit_core::payload::{FieldErrors, Payload};
use conduit_core::reducer::Reducer;

/// State backing the article editor form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorState {
    /// Slug of the article being edited. `None` while creating.
    pub article_slug: Option<String>,
    /// Title input.
    pub title: String,
    /// Description input.
    pub description: String,
    /// Markdown body input.
    pub body: String,
    /// Pending tag input, committed by `ADD_TAG`.
    pub tag_input: String,
    /// Committed tags. Duplicates and empty tags are allowed; the server
    /// decides what to keep.
    pub tag_list: TagList,
    /// True between `ASYNC_START` and the settled submit envelope.
    pub in_progress: bool,
    /// Field errors from the last failed submit, verbatim from the server.
    pub errors: Option<FieldErrors>,
}

/// Reducer for [`EditorState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(&self, state: &mut Self::State, action: &Self::Action, _env: &Self::Environment) {
        match action {
            AppAction::EditorPageLoaded { payload } => {
                *state = Self::State::default();
                if let Some(response) = payload.as_ref().and_then(Payload::ok) {
                    let article = &response.article;
                    state.article_slug = Some(article.slug.clone());
                    state.title = article.title.clone();
                    state.description = article.description.clone();
                    state.body = article.body.clone();
                    state.tag_list = article.tag_list.clone();
                }
            }
            AppAction::EditorPageUnloaded => *state = Self::State::default(),
            AppAction::ArticleSubmitted { payload } => {
                state.in_progress = false;
                state.errors = payload.errors().cloned();
            }
            AppAction::AsyncStart { subtype } if *subtype == Kind::ArticleSubmitted => {
                state.in_progress = true;
            }
            AppAction::AddTag => {
                let tag = std::mem::take(&mut state.tag_input);
                state.tag_list.push(tag);
            }
            AppAction::RemoveTag { tag } => {
                state.tag_list.retain(|existing| existing != tag);
            }
            AppAction::UpdateFieldEditor { field, value } => match field {
                EditorField::Title => state.title = value.clone(),
                EditorField::Description => state.description = value.clone(),
                EditorField::Body => state.body = value.clone(),
                EditorField::TagInput => state.tag_input = value.clone(),
            },
            _ => {}
        }
    }
}
