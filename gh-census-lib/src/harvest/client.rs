//! Thin GitHub REST client that classifies every response instead of failing.

use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, LINK};

const LOG_TARGET: &str = "    client";

/// Unwrap a successful `ApiResult` or return any other outcome retyped
macro_rules! unwrap_or_return {
    ($expr:expr) => {
        match $expr {
            ApiResult::Success(data, rate_limit) => (data, rate_limit),
            ApiResult::RateLimited(rate_limit) => return ApiResult::RateLimited(rate_limit),
            ApiResult::NotFound(rate_limit) => return ApiResult::NotFound(rate_limit),
            ApiResult::Failed(e, rate_limit) => return ApiResult::Failed(e, rate_limit),
        }
    };
}

/// Rate limit information from response headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub remaining: usize,
    pub reset_at: DateTime<Utc>,
}

/// Outcome of one call against the repository data source.
#[derive(Debug)]
pub enum ApiResult<T> {
    /// Request succeeded - contains data and optional rate limit info
    Success(T, Option<RateLimitInfo>),

    /// The source refused the request because of rate limiting (403 or 429)
    RateLimited(Option<RateLimitInfo>),

    /// The requested resource was not found (404)
    NotFound(Option<RateLimitInfo>),

    /// Any other failure, including network errors and undecodable bodies
    Failed(ohno::AppError, Option<RateLimitInfo>),
}

impl<T> ApiResult<T> {
    /// Rate limit info carried by this outcome, if the source reported any.
    #[must_use]
    pub const fn rate_limit(&self) -> Option<RateLimitInfo> {
        match self {
            Self::Success(_, rl) | Self::RateLimited(rl) | Self::NotFound(rl) | Self::Failed(_, rl) => *rl,
        }
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(..))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        match self {
            Self::Success(value, rl) => ApiResult::Success(f(value), rl),
            Self::RateLimited(rl) => ApiResult::RateLimited(rl),
            Self::NotFound(rl) => ApiResult::NotFound(rl),
            Self::Failed(e, rl) => ApiResult::Failed(e, rl),
        }
    }

    /// Short description of a non-success outcome, for log lines.
    #[must_use]
    pub fn describe_failure(&self) -> String {
        match self {
            Self::Success(..) => "success".to_string(),
            Self::RateLimited(_) => "rate limited".to_string(),
            Self::NotFound(_) => "not found".to_string(),
            Self::Failed(e, _) => format!("{e:#}"),
        }
    }
}

/// HTTP client for the GitHub REST API
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new client with an optional authentication token and base URL
    pub fn new(token: Option<&str>, base_url: impl Into<String>) -> crate::Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github.v3+json"));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}"))?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent("gh-census")
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL for this client, without a trailing slash
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an API call and classify the result
    pub async fn api_call(&self, url: &str) -> ApiResult<reqwest::Response> {
        log::debug!(target: LOG_TARGET, "GET {url}");

        let resp = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => return ApiResult::Failed(e.into(), None),
        };

        // Extract rate limit info from response headers before checking status
        let rate_limit = extract_rate_limit_from_headers(resp.headers());
        if let Some(rl) = &rate_limit {
            log::trace!(target: LOG_TARGET, "{} request(s) remaining until {}", rl.remaining, rl.reset_at);
        }

        let status = resp.status();
        if status.is_success() {
            return ApiResult::Success(resp, rate_limit);
        }

        match status.as_u16() {
            403 | 429 => ApiResult::RateLimited(rate_limit),
            404 => ApiResult::NotFound(rate_limit),
            code => ApiResult::Failed(ohno::app_err!("HTTP status {code} for {url}"), rate_limit),
        }
    }

    /// Make an API call and decode a successful body as JSON.
    ///
    /// The flag returned next to the body tells whether a further page exists.
    pub async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<(T, bool)> {
        let (resp, rate_limit) = unwrap_or_return!(self.api_call(url).await);

        let more = has_next_page(resp.headers());
        match resp.json().await {
            Ok(body) => ApiResult::Success((body, more), rate_limit),
            Err(e) => ApiResult::Failed(e.into(), rate_limit),
        }
    }
}

/// Whether the `Link` header advertises a further page.
#[must_use]
pub fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get(LINK)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|link_str| link_str.contains(r#"rel="next""#))
}

/// Extract rate limit information from API response headers
fn extract_rate_limit_from_headers(headers: &HeaderMap) -> Option<RateLimitInfo> {
    let remaining = headers.get("x-ratelimit-remaining")?.to_str().ok()?.parse::<usize>().ok()?;
    let reset_timestamp = headers.get("x-ratelimit-reset")?.to_str().ok()?.parse::<i64>().ok()?;
    let reset_at = DateTime::from_timestamp(reset_timestamp, 0)?;

    Some(RateLimitInfo { remaining, reset_at })
}
