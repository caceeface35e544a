use super::TriState;
use chrono::{DateTime, Utc};

/// A normalized GitHub user profile.
///
/// Text fields are never absent: missing values are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct User {
    pub login: String,
    pub name: String,
    /// Cleaned company name, see [`clean_company`](super::clean_company).
    pub company: String,
    pub location: String,
    pub email: String,
    pub hireable: TriState,
    pub bio: String,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    /// `None` when the source timestamp was missing or unparseable.
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// `followers / (1 + following)`: influence per followed account.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "follower counts are far below 2^52")]
    pub fn leader_strength(&self) -> f64 {
        self.followers as f64 / (1.0 + self.following as f64)
    }

    /// The last whitespace-separated word of the name, if there is one.
    #[must_use]
    pub fn surname(&self) -> Option<&str> {
        self.name.split_whitespace().next_back()
    }

    /// Number of whitespace-separated words in the bio.
    #[must_use]
    pub fn bio_word_count(&self) -> usize {
        self.bio.split_whitespace().count()
    }
}
