use super::client::ApiResult;
use super::source::{DataSource, UserStub};
use super::throttler::Throttler;
use futures_util::stream::{self, Stream, StreamExt};

const LOG_TARGET: &str = "    search";

/// Walks the user search endpoint page by page.
#[derive(Debug)]
pub struct SearchPaginator<'a, S> {
    source: &'a S,
    throttler: &'a Throttler,
    query: &'a str,
    page_size: u32,
}

impl<'a, S: DataSource> SearchPaginator<'a, S> {
    #[must_use]
    pub const fn new(source: &'a S, throttler: &'a Throttler, query: &'a str, page_size: u32) -> Self {
        Self {
            source,
            throttler,
            query,
            page_size,
        }
    }

    /// A lazy stream of every user stub the search returns.
    ///
    /// Nothing is requested until the stream is polled, and each call starts again from
    /// page 1. The stream ends after an empty page, after a page without a continuation
    /// indicator, or at the first non-success response. Stubs from earlier pages are
    /// kept in every case.
    pub fn stubs(&self) -> impl Stream<Item = UserStub> + '_ {
        stream::unfold(Some(1_u32), move |next_page| async move {
            let page_num = next_page?;

            self.throttler.pace().await;
            match self.source.search_users(self.query, self.page_size, page_num).await {
                ApiResult::Success(page, _) => {
                    if page.items.is_empty() {
                        log::debug!(target: LOG_TARGET, "Page {page_num} is empty, search exhausted");
                        return None;
                    }

                    log::info!(target: LOG_TARGET, "Fetched page {page_num} of users ({} stub(s))", page.items.len());
                    let next = if page.has_next { page_num.checked_add(1) } else { None };
                    Some((stream::iter(page.items), next))
                }
                failure => {
                    log::warn!(
                        target: LOG_TARGET,
                        "Could not fetch page {page_num} of users, stopping search: {}",
                        failure.describe_failure()
                    );
                    None
                }
            }
        })
        .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::source::{Page, Profile, RawRepository};
    use core::sync::atomic::{AtomicU32, Ordering};
    use core::time::Duration;

    /// Serves canned search pages; pages beyond the list fail.
    #[derive(Debug)]
    struct Pages {
        pages: Vec<ApiResult<Page<UserStub>>>,
        calls: AtomicU32,
    }

    impl Pages {
        fn new(pages: Vec<ApiResult<Page<UserStub>>>) -> Self {
            Self {
                pages,
                calls: AtomicU32::new(0),
            }
        }
    }

    fn page(logins: &[&str], has_next: bool) -> ApiResult<Page<UserStub>> {
        let items = logins.iter().map(|l| UserStub { login: (*l).to_string() }).collect();
        ApiResult::Success(Page::new(items, has_next), None)
    }

    fn clone_result(result: &ApiResult<Page<UserStub>>) -> ApiResult<Page<UserStub>> {
        match result {
            ApiResult::Success(page, rl) => ApiResult::Success(page.clone(), *rl),
            ApiResult::RateLimited(rl) => ApiResult::RateLimited(*rl),
            ApiResult::NotFound(rl) => ApiResult::NotFound(*rl),
            ApiResult::Failed(_, rl) => ApiResult::Failed(ohno::app_err!("failed"), *rl),
        }
    }

    impl DataSource for Pages {
        async fn search_users(&self, _query: &str, _per_page: u32, page: u32) -> ApiResult<Page<UserStub>> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            let index = usize::try_from(page - 1).unwrap();
            self.pages
                .get(index)
                .map_or_else(|| ApiResult::Failed(ohno::app_err!("no such page"), None), clone_result)
        }

        async fn fetch_profile(&self, _login: &str) -> ApiResult<Profile> {
            ApiResult::NotFound(None)
        }

        async fn list_repositories(&self, _login: &str, _per_page: u32, _page: u32) -> ApiResult<Page<RawRepository>> {
            ApiResult::NotFound(None)
        }
    }

    async fn collect(source: &Pages) -> Vec<String> {
        let throttler = Throttler::new(Duration::ZERO);
        let paginator = SearchPaginator::new(source, &throttler, "location:zurich", 2);
        paginator.stubs().map(|s| s.login).collect().await
    }

    #[tokio::test]
    async fn stops_without_continuation() {
        let source = Pages::new(vec![page(&["a", "b"], true), page(&["c"], false), page(&["never"], false)]);
        assert_eq!(collect(&source).await, ["a", "b", "c"]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stops_on_empty_page() {
        let source = Pages::new(vec![page(&["a"], true), page(&[], true), page(&["never"], false)]);
        assert_eq!(collect(&source).await, ["a"]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_keeps_earlier_pages() {
        let source = Pages::new(vec![
            page(&["a", "b"], true),
            ApiResult::RateLimited(None),
            page(&["never"], false),
        ]);
        assert_eq!(collect(&source).await, ["a", "b"]);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_on_first_page_yields_nothing() {
        let source = Pages::new(vec![ApiResult::NotFound(None)]);
        assert!(collect(&source).await.is_empty());
    }

    #[tokio::test]
    async fn is_lazy_and_restartable() {
        let source = Pages::new(vec![page(&["a"], true), page(&["b"], false)]);
        let throttler = Throttler::new(Duration::ZERO);
        let paginator = SearchPaginator::new(&source, &throttler, "q", 1);

        let stream = paginator.stubs();
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        drop(stream);

        let first: Vec<_> = paginator.stubs().take(1).map(|s| s.login).collect().await;
        assert_eq!(first, ["a"]);

        let all: Vec<_> = paginator.stubs().map(|s| s.login).collect().await;
        assert_eq!(all, ["a", "b"]);
    }
}
