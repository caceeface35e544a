use super::client::{ApiResult, RateLimitInfo};
use super::source::{DataSource, Page, Profile, RawRepository, UserStub};
use chrono::{DateTime, Utc};
use core::time::Duration;

const LOG_TARGET: &str = "     retry";

/// Longest we are willing to sleep waiting for a rate limit window to reset.
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_hours(1);

/// Cap on the exponent so the backoff arithmetic cannot overflow.
const MAX_BACKOFF_EXPONENT: u32 = 16;

/// Retries failed and rate-limited calls of an inner [`DataSource`] with exponential backoff.
///
/// With `max_retries == 0` every call is passed straight through, which gives the
/// single-attempt behavior. Successful and not-found outcomes are never retried.
#[derive(Debug, Clone)]
pub struct RetryingSource<S> {
    inner: S,
    max_retries: u32,
    base_delay: Duration,
}

impl<S: DataSource> RetryingSource<S> {
    #[must_use]
    pub const fn new(inner: S, max_retries: u32, base_delay: Duration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
        }
    }

    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    async fn with_retry<T, F, Fut>(&self, what: &str, op: F) -> ApiResult<T>
    where
        F: Fn() -> Fut + Send + Sync,
        Fut: Future<Output = ApiResult<T>> + Send,
        T: Send,
    {
        let mut attempt = 0;
        loop {
            let result = op().await;

            let retryable = matches!(result, ApiResult::RateLimited(_) | ApiResult::Failed(..));
            if !retryable || attempt >= self.max_retries {
                return result;
            }

            let delay = retry_delay(attempt, self.base_delay, &result, Utc::now());
            log::debug!(
                target: LOG_TARGET,
                "Retrying {what} after {} (attempt {}, delay {}ms)",
                result.describe_failure(),
                attempt + 1,
                delay.as_millis(),
            );

            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

/// How long to wait before retry number `attempt + 1`.
///
/// A rate limit with a known future reset time waits for the reset (capped); everything
/// else backs off exponentially from `base`.
fn retry_delay<T>(attempt: u32, base: Duration, result: &ApiResult<T>, now: DateTime<Utc>) -> Duration {
    if let ApiResult::RateLimited(Some(RateLimitInfo { reset_at, .. })) = result
        && *reset_at > now
    {
        let wait = (*reset_at - now).to_std().unwrap_or(Duration::ZERO);
        return wait.min(MAX_RATE_LIMIT_WAIT);
    }

    base.saturating_mul(1 << attempt.min(MAX_BACKOFF_EXPONENT))
}

impl<S: DataSource> DataSource for RetryingSource<S> {
    async fn search_users(&self, query: &str, per_page: u32, page: u32) -> ApiResult<Page<UserStub>> {
        self.with_retry("user search", || self.inner.search_users(query, per_page, page))
            .await
    }

    async fn fetch_profile(&self, login: &str) -> ApiResult<Profile> {
        self.with_retry("profile fetch", || self.inner.fetch_profile(login)).await
    }

    async fn list_repositories(&self, login: &str, per_page: u32, page: u32) -> ApiResult<Page<RawRepository>> {
        self.with_retry("repository listing", || self.inner.list_repositories(login, per_page, page))
            .await
    }
}
