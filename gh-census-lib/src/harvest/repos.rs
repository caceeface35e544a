use super::client::ApiResult;
use super::source::{DataSource, RawRepository};
use super::throttler::Throttler;
use crate::dataset::{Repository, TriState, license_name, parse_timestamp};

const LOG_TARGET: &str = "     repos";

/// Fetches the repositories of one user, newest-pushed first, up to a cap.
#[derive(Debug)]
pub struct RepoCollector<'a, S> {
    source: &'a S,
    throttler: &'a Throttler,
    page_size: u32,
    max_repos: usize,
}

impl<'a, S: DataSource> RepoCollector<'a, S> {
    #[must_use]
    pub const fn new(source: &'a S, throttler: &'a Throttler, page_size: u32, max_repos: usize) -> Self {
        Self {
            source,
            throttler,
            page_size,
            max_repos,
        }
    }

    /// Collect at most `max_repos` repositories owned by `login`.
    ///
    /// Fewer are returned only when the source runs out first, or when a page request
    /// fails, in which case the repositories gathered so far are kept.
    pub async fn collect(&self, login: &str) -> Vec<Repository> {
        let mut repos = Vec::new();
        let mut page_num = 1_u32;

        while repos.len() < self.max_repos {
            self.throttler.pace().await;

            let page = match self.source.list_repositories(login, self.page_size, page_num).await {
                ApiResult::Success(page, _) => page,
                failure => {
                    log::warn!(
                        target: LOG_TARGET,
                        "Could not fetch page {page_num} of repositories for '{login}', keeping {}: {}",
                        repos.len(),
                        failure.describe_failure()
                    );
                    break;
                }
            };

            if page.items.is_empty() {
                break;
            }

            let room = self.max_repos - repos.len();
            repos.extend(page.items.into_iter().take(room).map(|raw| normalize_repository(login, raw)));

            if !page.has_next {
                break;
            }

            let Some(next) = page_num.checked_add(1) else {
                break;
            };
            page_num = next;
        }

        log::info!(target: LOG_TARGET, "Collected {} repositories for '{login}'", repos.len());
        repos
    }
}

/// Build a [`Repository`] owned by `login` from a raw listing entry.
#[must_use]
pub fn normalize_repository(login: &str, raw: RawRepository) -> Repository {
    Repository {
        login: login.to_string(),
        full_name: raw.name.unwrap_or_default(),
        created_at: raw.created_at.as_deref().and_then(parse_timestamp),
        stargazers_count: raw.stargazers_count.unwrap_or(0),
        watchers_count: raw.watchers_count.unwrap_or(0),
        language: raw.language.unwrap_or_default(),
        has_projects: TriState::from(raw.has_projects),
        has_wiki: TriState::from(raw.has_wiki),
        license_name: license_name(raw.license.and_then(|l| l.key).as_deref()),
    }
}
