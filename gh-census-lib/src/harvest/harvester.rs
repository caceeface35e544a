use super::enricher::UserEnricher;
use super::paginator::SearchPaginator;
use super::progress::Progress;
use super::repos::RepoCollector;
use super::source::DataSource;
use super::throttler::Throttler;
use crate::HashSet;
use crate::dataset::{Dataset, DatasetBuilder};
use core::time::Duration;
use futures_util::StreamExt;

const LOG_TARGET: &str = " harvester";

/// Knobs for one harvest run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSettings {
    pub query: String,
    pub search_page_size: u32,
    pub repo_page_size: u32,
    pub max_repos_per_user: usize,
    pub request_interval: Duration,
}

/// Drives a full harvest: search, then profiles, then repositories.
#[derive(Debug)]
pub struct Harvester<S> {
    source: S,
    settings: HarvestSettings,
    throttler: Throttler,
}

impl<S: DataSource> Harvester<S> {
    #[must_use]
    pub fn new(source: S, settings: HarvestSettings) -> Self {
        let throttler = Throttler::new(settings.request_interval);
        Self {
            source,
            settings,
            throttler,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &HarvestSettings {
        &self.settings
    }

    /// Run the harvest to completion.
    ///
    /// Transport failures only ever shrink the result: a failed search page ends the
    /// search, a failed profile skips that user, and a failed repository page keeps what
    /// that user's earlier pages produced.
    pub async fn harvest(&self, progress: &dyn Progress) -> Dataset {
        let settings = &self.settings;

        progress.set_phase("Searching");
        progress.set_total(0);
        let paginator = SearchPaginator::new(&self.source, &self.throttler, &settings.query, settings.search_page_size);
        let mut seen = HashSet::default();
        let stubs: Vec<_> = paginator
            .stubs()
            .inspect(|stub| progress.advance(1, &stub.login))
            .filter(|stub| core::future::ready(seen.insert(stub.login.clone())))
            .collect()
            .await;
        log::info!(target: LOG_TARGET, "Search for '{}' found {} distinct user(s)", settings.query, stubs.len());

        progress.set_phase("Profiles");
        progress.set_total(stubs.len() as u64);
        let enricher = UserEnricher::new(&self.source, &self.throttler);
        let mut builder = DatasetBuilder::default();
        for stub in &stubs {
            progress.advance(1, &stub.login);
            if let Some(user) = enricher.enrich(&stub.login).await {
                let _ = builder.add_user(user);
            }
        }
        log::info!(
            target: LOG_TARGET,
            "Fetched {} of {} profile(s)",
            builder.user_count(),
            stubs.len()
        );

        let logins = builder.logins();
        progress.set_phase("Repositories");
        progress.set_total(logins.len() as u64);
        let collector = RepoCollector::new(
            &self.source,
            &self.throttler,
            settings.repo_page_size,
            settings.max_repos_per_user,
        );
        for login in &logins {
            progress.advance(1, login);
            let repos = collector.collect(login).await;
            builder.add_repositories(repos);
        }

        progress.done();

        let dataset = builder.build();
        log::info!(
            target: LOG_TARGET,
            "Harvested {} user(s) and {} repositories",
            dataset.users().len(),
            dataset.repositories().len()
        );
        dataset
    }
}
