//! The repository data source capability the harvester is written against.

use super::client::ApiResult;
use serde::Deserialize;

/// One page of results plus the continuation indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub has_next: bool,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn new(items: Vec<T>, has_next: bool) -> Self {
        Self { items, has_next }
    }
}

/// A search hit. Only the login is needed to fetch the full profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserStub {
    pub login: String,
}

/// The user search response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub items: Vec<UserStub>,
}

/// A full profile as returned by the source, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub login: Option<String>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub email: Option<String>,
    pub hireable: Option<bool>,
    pub bio: Option<String>,
    pub public_repos: Option<u64>,
    pub followers: Option<u64>,
    pub following: Option<u64>,
    pub created_at: Option<String>,
}

/// A repository as returned by the source, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
#[expect(clippy::struct_field_names, reason = "field names match GitHub API exactly")]
pub struct RawRepository {
    pub name: Option<String>,
    pub created_at: Option<String>,
    pub stargazers_count: Option<u64>,
    pub watchers_count: Option<u64>,
    pub language: Option<String>,
    pub has_projects: Option<bool>,
    pub has_wiki: Option<bool>,
    pub license: Option<License>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct License {
    pub key: Option<String>,
}

/// Where harvested data comes from.
///
/// The GitHub implementation talks HTTP; tests substitute in-memory sources. Decorators
/// such as retry wrap another source without the harvester noticing.
pub trait DataSource: Send + Sync {
    /// Search for users matching `query`. Pages are numbered from 1.
    fn search_users(&self, query: &str, per_page: u32, page: u32) -> impl Future<Output = ApiResult<Page<UserStub>>> + Send;

    /// Fetch the full profile for `login`.
    fn fetch_profile(&self, login: &str) -> impl Future<Output = ApiResult<Profile>> + Send;

    /// List the repositories owned by `login`, most recently pushed first.
    fn list_repositories(&self, login: &str, per_page: u32, page: u32) -> impl Future<Output = ApiResult<Page<RawRepository>>> + Send;
}
