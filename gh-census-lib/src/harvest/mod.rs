//! Harvesting users and repositories from a repository data source.
//!
//! The [`Harvester`] composes three components over a [`DataSource`]:
//!
//! - [`SearchPaginator`] walks the user search page by page.
//! - [`UserEnricher`] turns each search hit into a normalized user.
//! - [`RepoCollector`] gathers up to a fixed number of repositories per user.
//!
//! Every request goes through one shared [`Throttler`] so that consecutive requests
//! start at least the configured interval apart. [`GitHubSource`] is the HTTP
//! implementation; [`RetryingSource`] can wrap any source to add backoff.

mod client;
mod enricher;
mod github;
mod harvester;
mod paginator;
mod progress;
mod repos;
mod retry;
mod source;
mod throttler;

pub use client::{ApiResult, RateLimitInfo};
pub use enricher::{UserEnricher, normalize_profile};
pub use github::GitHubSource;
pub use harvester::{HarvestSettings, Harvester};
pub use paginator::SearchPaginator;
pub use progress::{NoProgress, Progress};
pub use repos::{RepoCollector, normalize_repository};
pub use retry::RetryingSource;
pub use source::{DataSource, License, Page, Profile, RawRepository, UserStub};
pub use throttler::Throttler;
