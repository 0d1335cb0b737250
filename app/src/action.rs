//! Application envelopes.
//!
//! Every state transition in the client is one of these envelopes. Kinds
//! form a closed enumeration whose `Display` output is the canonical wire
//! name, preserved bit for bit from the client protocol.

use crate::model::{ArticleListPage, ArticleResponse, HomeFeed, UserResponse};
use conduit_core::action::{Action, SettleFuture, Split};
use conduit_core::payload::{ApiFuture, Payload};
use std::fmt;
use std::str::FromStr;

/// Closed enumeration of envelope kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Home page data arrived (tags plus first feed page).
    HomePageLoaded,
    /// The home page was left.
    HomePageUnloaded,
    /// An article was favorited.
    ArticleFavorited,
    /// An article was unfavorited.
    ArticleUnfavorited,
    /// A pager click landed on a new page.
    SetPage,
    /// A tag filter was applied from the sidebar.
    ApplyTagFilter,
    /// The feed tab changed.
    ChangeTab,
    /// A login attempt settled.
    Login,
    /// A registration attempt settled.
    Register,
    /// The user signed out.
    Logout,
    /// The login page was left.
    LoginPageUnloaded,
    /// The register page was left.
    RegisterPageUnloaded,
    /// An auth form field changed.
    UpdateFieldAuth,
    /// An editor form field changed.
    UpdateFieldEditor,
    /// The editor opened (with an article to edit, or blank).
    EditorPageLoaded,
    /// The editor was left.
    EditorPageUnloaded,
    /// The pending tag input was committed to the tag list.
    AddTag,
    /// A tag was removed from the tag list.
    RemoveTag,
    /// An article create/update attempt settled.
    ArticleSubmitted,
    /// Synthesized: a request went async.
    AsyncStart,
    /// Synthesized: an async exchange closed.
    AsyncEnd,
}

impl Kind {
    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HomePageLoaded => "HOME_PAGE_LOADED",
            Self::HomePageUnloaded => "HOME_PAGE_UNLOADED",
            Self::ArticleFavorited => "ARTICLE_FAVORITED",
            Self::ArticleUnfavorited => "ARTICLE_UNFAVORITED",
            Self::SetPage => "SET_PAGE",
            Self::ApplyTagFilter => "APPLY_TAG_FILTER",
            Self::ChangeTab => "CHANGE_TAB",
            Self::Login => "LOGIN",
            Self::Register => "REGISTER",
            Self::Logout => "LOGOUT",
            Self::LoginPageUnloaded => "LOGIN_PAGE_UNLOADED",
            Self::RegisterPageUnloaded => "REGISTER_PAGE_UNLOADED",
            Self::UpdateFieldAuth => "UPDATE_FIELD_AUTH",
            Self::UpdateFieldEditor => "UPDATE_FIELD_EDITOR",
            Self::EditorPageLoaded => "EDITOR_PAGE_LOADED",
            Self::EditorPageUnloaded => "EDITOR_PAGE_UNLOADED",
            Self::AddTag => "ADD_TAG",
            Self::RemoveTag => "REMOVE_TAG",
            Self::ArticleSubmitted => "ARTICLE_SUBMITTED",
            Self::AsyncStart => "ASYNC_START",
            Self::AsyncEnd => "ASYNC_END",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a field name does not belong to the target slice.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown {slice} field: {name}")]
pub struct UnknownField {
    /// Slice the field was aimed at.
    pub slice: &'static str,
    /// The rejected field name.
    pub name: String,
}

/// Auth form fields addressable by `UPDATE_FIELD_AUTH`.
///
/// A closed set: a field-update envelope can only name a field the auth
/// slice actually has.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthField {
    /// The email input.
    Email,
    /// The password input.
    Password,
    /// The username input (register form only).
    Username,
}

impl AuthField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
            Self::Username => "username",
        }
    }
}

impl FromStr for AuthField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "password" => Ok(Self::Password),
            "username" => Ok(Self::Username),
            _ => Err(UnknownField {
                slice: "auth",
                name: s.to_string(),
            }),
        }
    }
}

/// Editor form fields addressable by `UPDATE_FIELD_EDITOR`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorField {
    /// The title input.
    Title,
    /// The description input.
    Description,
    /// The markdown body input.
    Body,
    /// The pending tag input (committed by `ADD_TAG`).
    TagInput,
}

impl EditorField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Body => "body",
            Self::TagInput => "tagInput",
        }
    }
}

impl FromStr for EditorField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(Self::Title),
            "description" => Ok(Self::Description),
            "body" => Ok(Self::Body),
            "tagInput" => Ok(Self::TagInput),
            _ => Err(UnknownField {
                slice: "editor",
                name: s.to_string(),
            }),
        }
    }
}

/// A dispatched envelope.
///
/// Variants that carry a [`Payload`] may be dispatched while the payload is
/// still in flight; the store's async stage settles them before any reducer
/// sees them.
#[derive(Debug)]
pub enum AppAction {
    /// Home page data: popular tags plus the first feed page, with the tab
    /// the user landed on.
    HomePageLoaded {
        /// Active tab, if one was selected.
        tab: Option<String>,
        /// Combined feed payload. Absent when the page renders before any
        /// fetch is issued.
        payload: Option<Payload<HomeFeed>>,
    },
    /// The home page was left.
    HomePageUnloaded,
    /// Favorite toggled on.
    ArticleFavorited {
        /// The updated article.
        payload: Payload<ArticleResponse>,
    },
    /// Favorite toggled off.
    ArticleUnfavorited {
        /// The updated article.
        payload: Payload<ArticleResponse>,
    },
    /// A pager click.
    SetPage {
        /// Zero-based page index.
        page: u64,
        /// The requested page.
        payload: Payload<ArticleListPage>,
    },
    /// A tag filter applied from the sidebar.
    ApplyTagFilter {
        /// The selected tag.
        tag: String,
        /// First page of the filtered feed.
        payload: Payload<ArticleListPage>,
    },
    /// The feed tab changed.
    ChangeTab {
        /// The selected tab.
        tab: String,
        /// First page of the tab's feed.
        payload: Payload<ArticleListPage>,
    },
    /// A login attempt.
    Login {
        /// The authenticated user, or field errors.
        payload: Payload<UserResponse>,
    },
    /// A registration attempt.
    Register {
        /// The created user, or field errors.
        payload: Payload<UserResponse>,
    },
    /// The user signed out.
    Logout,
    /// The login page was left.
    LoginPageUnloaded,
    /// The register page was left.
    RegisterPageUnloaded,
    /// An auth form field changed.
    UpdateFieldAuth {
        /// Which field.
        field: AuthField,
        /// The new value.
        value: String,
    },
    /// An editor form field changed.
    UpdateFieldEditor {
        /// Which field.
        field: EditorField,
        /// The new value.
        value: String,
    },
    /// The editor opened.
    EditorPageLoaded {
        /// The article being edited, or `None` for a blank editor.
        payload: Option<Payload<ArticleResponse>>,
    },
    /// The editor was left.
    EditorPageUnloaded,
    /// The pending tag input was committed.
    AddTag,
    /// A tag was removed.
    RemoveTag {
        /// The tag to remove.
        tag: String,
    },
    /// An article create/update attempt.
    ArticleSubmitted {
        /// The persisted article, or field errors.
        payload: Payload<ArticleResponse>,
    },
    /// Synthesized by the async stage when a request goes async.
    AsyncStart {
        /// Kind of the originating envelope.
        subtype: Kind,
    },
    /// Synthesized by the async stage when an exchange closes.
    AsyncEnd,
}

/// Builds the settle future for an in-flight envelope: await the request,
/// then rebuild the envelope with the settled payload. Rejections become
/// error payloads here, so the future itself never fails.
fn settle<T, F>(future: ApiFuture<T>, rebuild: F) -> SettleFuture<AppAction>
where
    T: Send + 'static,
    F: FnOnce(Payload<T>) -> AppAction + Send + 'static,
{
    Box::pin(async move {
        match future.await {
            Ok(value) => rebuild(Payload::Ok(value)),
            Err(error) => rebuild(Payload::Err(error.into_body())),
        }
    })
}

impl Action for AppAction {
    type Kind = Kind;

    fn kind(&self) -> Kind {
        match self {
            Self::HomePageLoaded { .. } => Kind::HomePageLoaded,
            Self::HomePageUnloaded => Kind::HomePageUnloaded,
            Self::ArticleFavorited { .. } => Kind::ArticleFavorited,
            Self::ArticleUnfavorited { .. } => Kind::ArticleUnfavorited,
            Self::SetPage { .. } => Kind::SetPage,
            Self::ApplyTagFilter { .. } => Kind::ApplyTagFilter,
            Self::ChangeTab { .. } => Kind::ChangeTab,
            Self::Login { .. } => Kind::Login,
            Self::Register { .. } => Kind::Register,
            Self::Logout => Kind::Logout,
            Self::LoginPageUnloaded => Kind::LoginPageUnloaded,
            Self::RegisterPageUnloaded => Kind::RegisterPageUnloaded,
            Self::UpdateFieldAuth { .. } => Kind::UpdateFieldAuth,
            Self::UpdateFieldEditor { .. } => Kind::UpdateFieldEditor,
            Self::EditorPageLoaded { .. } => Kind::EditorPageLoaded,
            Self::EditorPageUnloaded => Kind::EditorPageUnloaded,
            Self::AddTag => Kind::AddTag,
            Self::RemoveTag { .. } => Kind::RemoveTag,
            Self::ArticleSubmitted { .. } => Kind::ArticleSubmitted,
            Self::AsyncStart { .. } => Kind::AsyncStart,
            Self::AsyncEnd => Kind::AsyncEnd,
        }
    }

    fn split(self) -> Split<Self> {
        let subtype = self.kind();
        match self {
            Self::HomePageLoaded {
                tab,
                payload: Some(Payload::Pending(future)),
            } => Split::InFlight {
                subtype,
                settle: settle(future, move |payload| Self::HomePageLoaded {
                    tab,
                    payload: Some(payload),
                }),
            },
            Self::ArticleFavorited {
                payload: Payload::Pending(future),
            } => Split::InFlight {
                subtype,
                settle: settle(future, |payload| Self::ArticleFavorited { payload }),
            },
            Self::ArticleUnfavorited {
                payload: Payload::Pending(future),
            } => Split::InFlight {
                subtype,
                settle: settle(future, |payload| Self::ArticleUnfavorited { payload }),
            },
            Self::SetPage {
                page,
                payload: Payload::Pending(future),
            } => Split::InFlight {
                subtype,
                settle: settle(future, move |payload| Self::SetPage { page, payload }),
            },
            Self::ApplyTagFilter {
                tag,
                payload: Payload::Pending(future),
            } => Split::InFlight {
                subtype,
                settle: settle(future, move |payload| Self::ApplyTagFilter { tag, payload }),
            },
            Self::ChangeTab {
                tab,
                payload: Payload::Pending(future),
            } => Split::InFlight {
                subtype,
                settle: settle(future, move |payload| Self::ChangeTab { tab, payload }),
            },
            Self::Login {
                payload: Payload::Pending(future),
            } => Split::InFlight {
                subtype,
                settle: settle(future, |payload| Self::Login { payload }),
            },
            Self::Register {
                payload: Payload::Pending(future),
            } => Split::InFlight {
                subtype,
                settle: settle(future, |payload| Self::Register { payload }),
            },
            Self::EditorPageLoaded {
                payload: Some(Payload::Pending(future)),
            } => Split::InFlight {
                subtype,
                settle: settle(future, |payload| Self::EditorPageLoaded {
                    payload: Some(payload),
                }),
            },
            Self::ArticleSubmitted {
                payload: Payload::Pending(future),
            } => Split::InFlight {
                subtype,
                settle: settle(future, |payload| Self::ArticleSubmitted { payload }),
            },
            settled => Split::Settled(settled),
        }
    }

    fn async_start(subtype: Kind) -> Self {
        Self::AsyncStart { subtype }
    }

    fn async_end() -> Self {
        Self::AsyncEnd
    }
}
