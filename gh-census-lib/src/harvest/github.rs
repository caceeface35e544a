use super::client::{ApiResult, Client};
use super::source::{DataSource, Page, Profile, RawRepository, SearchResponse, UserStub};
use crate::Result;
use ohno::{IntoAppError, bail};
use url::Url;

const LOG_TARGET: &str = "    github";

/// [`DataSource`] backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubSource {
    client: Client,
}

impl GitHubSource {
    pub fn new(token: Option<&str>, base_url: &str) -> Result<Self> {
        // Fail early on a base URL we could never build request URLs from
        let _ = Url::parse(base_url).into_app_err_with(|| format!("invalid API base URL '{base_url}'"))?;

        Ok(Self {
            client: Client::new(token, base_url)?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Build `{base}/{segments...}?{params...}` with proper escaping.
    fn endpoint(&self, segments: &[&str], params: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(self.client.base_url()).into_app_err("parsing API base URL")?;

        {
            let Ok(mut path) = url.path_segments_mut() else {
                bail!("API base URL '{}' cannot have a path", self.client.base_url());
            };
            let _ = path.pop_if_empty().extend(segments);
        }

        if !params.is_empty() {
            let _ = url.query_pairs_mut().extend_pairs(params);
        }

        Ok(url)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Result<Url>) -> ApiResult<(T, bool)> {
        match url {
            Ok(url) => self.client.get_json(url.as_str()).await,
            Err(e) => ApiResult::Failed(e, None),
        }
    }
}

impl DataSource for GitHubSource {
    async fn search_users(&self, query: &str, per_page: u32, page: u32) -> ApiResult<Page<UserStub>> {
        log::debug!(target: LOG_TARGET, "Searching users for '{query}', page {page}");

        let per_page = per_page.to_string();
        let page = page.to_string();
        let url = self.endpoint(&["search", "users"], &[("q", query), ("per_page", &per_page), ("page", &page)]);

        self.get_json::<SearchResponse>(url)
            .await
            .map(|(resp, more)| Page::new(resp.items, more))
    }

    async fn fetch_profile(&self, login: &str) -> ApiResult<Profile> {
        let url = self.endpoint(&["users", login], &[]);
        self.get_json::<Profile>(url).await.map(|(profile, _)| profile)
    }

    async fn list_repositories(&self, login: &str, per_page: u32, page: u32) -> ApiResult<Page<RawRepository>> {
        let per_page = per_page.to_string();
        let page = page.to_string();
        let url = self.endpoint(
            &["users", login, "repos"],
            &[("per_page", &per_page), ("page", &page), ("sort", "pushed"), ("direction", "desc")],
        );

        self.get_json::<Vec<RawRepository>>(url)
            .await
            .map(|(repos, more)| Page::new(repos, more))
    }
}
