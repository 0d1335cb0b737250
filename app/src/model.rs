//! Wire-shaped domain types.
//!
//! These mirror the JSON bodies the API returns, camelCase on the wire.
//! Response wrappers (`UserResponse`, `ArticleResponse`, ...) keep the
//! envelope nesting the server uses so payloads deserialize directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Tag list for an article. Most articles carry a handful of tags, so the
/// list stays inline.
pub type TagList = SmallVec<[String; 8]>;

/// Public author profile attached to an article.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique username.
    pub username: String,
    /// Free-form bio, absent for most accounts.
    pub bio: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
    /// Whether the current user follows this profile.
    pub following: bool,
}

/// A published article as the API returns it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// URL-safe identifier.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// One-line description shown in lists.
    pub description: String,
    /// Markdown body.
    pub body: String,
    /// Tags, in server order.
    pub tag_list: TagList,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
    /// Whether the current user has favorited this article.
    pub favorited: bool,
    /// Total favorite count.
    pub favorites_count: u64,
    /// The article's author.
    pub author: Profile,
}

/// The signed-in user, including the credential token.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account email.
    pub email: String,
    /// Credential token. Mirrored to durable storage by middleware; never
    /// part of the state tree.
    pub token: String,
    /// Unique username.
    pub username: String,
    /// Free-form bio.
    pub bio: Option<String>,
    /// Avatar URL.
    pub image: Option<String>,
}

/// Response body for login and register.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// The authenticated user.
    pub user: User,
}

/// Response body for single-article endpoints (fetch, favorite, submit).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleResponse {
    /// The article.
    pub article: Article,
}

/// One page of an article listing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleListPage {
    /// The articles on this page.
    pub articles: Vec<Article>,
    /// Total article count across all pages.
    pub articles_count: u64,
}

/// Combined payload for the home page: the popular-tags sidebar plus the
/// first page of the feed, fetched together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeFeed {
    /// Popular tags for the sidebar.
    pub tags: Vec<String>,
    /// First page of the feed.
    pub page: ArticleListPage,
}
