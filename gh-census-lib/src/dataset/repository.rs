use super::TriState;
use chrono::{DateTime, Datelike, Utc, Weekday};

/// A normalized repository owned by a harvested user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Repository {
    /// Login of the owning user.
    pub login: String,
    pub full_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub stargazers_count: u64,
    pub watchers_count: u64,
    pub language: String,
    pub has_projects: TriState,
    pub has_wiki: TriState,
    pub license_name: String,
}

impl Repository {
    /// Whether the repository was created on a Saturday or Sunday (UTC).
    ///
    /// Repositories with an unknown creation time are never weekend creations.
    #[must_use]
    pub fn created_on_weekend(&self) -> bool {
        self.created_at
            .is_some_and(|ts| matches!(ts.weekday(), Weekday::Sat | Weekday::Sun))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created(y: i32, m: u32, d: u32) -> Repository {
        Repository {
            created_at: Some(Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()),
            ..Repository::default()
        }
    }

    #[test]
    fn test_weekend_days() {
        // 2024-06-01 was a Saturday, 2024-06-02 a Sunday
        assert!(created(2024, 6, 1).created_on_weekend());
        assert!(created(2024, 6, 2).created_on_weekend());
    }

    #[test]
    fn test_weekdays() {
        // 2024-06-05 was a Wednesday
        assert!(!created(2024, 6, 5).created_on_weekend());
        assert!(!created(2024, 6, 3).created_on_weekend());
        assert!(!created(2024, 6, 7).created_on_weekend());
    }

    #[test]
    fn test_weekend_uses_utc() {
        // Friday 23:30 UTC is Saturday in Zurich, but classification is in UTC
        let repo = Repository {
            created_at: Some(Utc.with_ymd_and_hms(2024, 5, 31, 23, 30, 0).unwrap()),
            ..Repository::default()
        };
        assert!(!repo.created_on_weekend());
    }

    #[test]
    fn test_unknown_creation_time_is_not_weekend() {
        assert!(!Repository::default().created_on_weekend());
    }
}
