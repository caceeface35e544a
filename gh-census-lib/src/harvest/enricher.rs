use super::client::ApiResult;
use super::source::{DataSource, Profile};
use super::throttler::Throttler;
use crate::dataset::{TriState, User, clean_company, parse_timestamp};

const LOG_TARGET: &str = "    enrich";

/// Turns search hits into full, normalized user records.
#[derive(Debug)]
pub struct UserEnricher<'a, S> {
    source: &'a S,
    throttler: &'a Throttler,
}

impl<'a, S: DataSource> UserEnricher<'a, S> {
    #[must_use]
    pub const fn new(source: &'a S, throttler: &'a Throttler) -> Self {
        Self { source, throttler }
    }

    /// Fetch and normalize the profile for `login`.
    ///
    /// Returns `None` when the source does not answer with a profile; the caller moves
    /// on to the next login.
    pub async fn enrich(&self, login: &str) -> Option<User> {
        self.throttler.pace().await;

        match self.source.fetch_profile(login).await {
            ApiResult::Success(profile, _) => {
                log::info!(target: LOG_TARGET, "Fetched profile of '{login}'");
                Some(normalize_profile(login, profile))
            }
            failure => {
                log::warn!(target: LOG_TARGET, "Skipping user '{login}': {}", failure.describe_failure());
                None
            }
        }
    }
}

/// Build a [`User`] from a raw profile, defaulting anything missing.
///
/// `requested_login` stands in when the profile itself carries no login.
#[must_use]
pub fn normalize_profile(requested_login: &str, profile: Profile) -> User {
    let login = profile
        .login
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| requested_login.to_string());

    User {
        login,
        name: profile.name.unwrap_or_default(),
        company: clean_company(profile.company.as_deref()),
        location: profile.location.unwrap_or_default(),
        email: profile.email.unwrap_or_default(),
        hireable: TriState::from(profile.hireable),
        bio: profile.bio.unwrap_or_default(),
        public_repos: profile.public_repos.unwrap_or(0),
        followers: profile.followers.unwrap_or(0),
        following: profile.following.unwrap_or(0),
        created_at: profile.created_at.as_deref().and_then(parse_timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::source::{Page, RawRepository, UserStub};
    use chrono::{TimeZone, Utc};
    use core::time::Duration;

    #[derive(Debug)]
    struct Profiles;

    impl DataSource for Profiles {
        async fn search_users(&self, _query: &str, _per_page: u32, _page: u32) -> ApiResult<Page<UserStub>> {
            ApiResult::NotFound(None)
        }

        async fn fetch_profile(&self, login: &str) -> ApiResult<Profile> {
            match login {
                "gone" => ApiResult::NotFound(None),
                "broken" => ApiResult::Failed(ohno::app_err!("HTTP status 500"), None),
                _ => ApiResult::Success(
                    Profile {
                        login: Some(login.to_string()),
                        company: Some(" @acme ".to_string()),
                        hireable: Some(true),
                        followers: Some(7),
                        ..Profile::default()
                    },
                    None,
                ),
            }
        }

        async fn list_repositories(&self, _login: &str, _per_page: u32, _page: u32) -> ApiResult<Page<RawRepository>> {
            ApiResult::NotFound(None)
        }
    }

    #[tokio::test]
    async fn enrich_normalizes_profile() {
        let throttler = Throttler::new(Duration::ZERO);
        let enricher = UserEnricher::new(&Profiles, &throttler);

        let user = enricher.enrich("alice").await.unwrap();
        assert_eq!(user.login, "alice");
        assert_eq!(user.company, "ACME");
        assert_eq!(user.hireable, TriState::True);
        assert_eq!(user.followers, 7);
        assert_eq!(user.following, 0);
    }

    #[tokio::test]
    async fn enrich_skips_failures() {
        let throttler = Throttler::new(Duration::ZERO);
        let enricher = UserEnricher::new(&Profiles, &throttler);

        assert!(enricher.enrich("gone").await.is_none());
        assert!(enricher.enrich("broken").await.is_none());
    }

    #[test]
    fn test_normalize_profile_defaults() {
        let user = normalize_profile("octocat", Profile::default());
        assert_eq!(user.login, "octocat");
        assert_eq!(user.name, "");
        assert_eq!(user.company, "");
        assert_eq!(user.email, "");
        assert_eq!(user.hireable, TriState::Unknown);
        assert_eq!(user.public_repos, 0);
        assert_eq!(user.created_at, None);
    }

    #[test]
    fn test_normalize_profile_fields() {
        let profile = Profile {
            login: Some("Octocat".to_string()),
            name: Some("The Octocat".to_string()),
            company: Some("@github".to_string()),
            location: Some("Zurich".to_string()),
            email: Some("octo@example.com".to_string()),
            hireable: Some(false),
            bio: Some("hi".to_string()),
            public_repos: Some(8),
            followers: Some(100),
            following: Some(9),
            created_at: Some("2011-01-25T18:44:36Z".to_string()),
        };

        let user = normalize_profile("octocat", profile);
        assert_eq!(user.login, "Octocat");
        assert_eq!(user.company, "GITHUB");
        assert_eq!(user.hireable, TriState::False);
        assert_eq!(user.following, 9);
        assert_eq!(user.created_at, Some(Utc.with_ymd_and_hms(2011, 1, 25, 18, 44, 36).unwrap()));
    }

    #[test]
    fn test_normalize_profile_bad_timestamp_is_null() {
        let profile = Profile {
            created_at: Some("not a date".to_string()),
            ..Profile::default()
        };
        assert_eq!(normalize_profile("x", profile).created_at, None);
    }
}
