use super::{Repository, User};
use crate::HashSet;

const LOG_TARGET: &str = "   dataset";

/// The two normalized tables produced by one harvest run.
///
/// A `Dataset` is immutable once built. Queries borrow it read-only and keep any
/// derived columns local to themselves, so answering one question can never change
/// the answer to another.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    users: Vec<User>,
    repositories: Vec<Repository>,
}

impl Dataset {
    /// Build a dataset from already-normalized tables.
    ///
    /// Users with a login that was already seen are dropped so that logins stay unique.
    /// Users without a login are always kept.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>, repositories: impl IntoIterator<Item = Repository>) -> Self {
        let mut builder = DatasetBuilder::default();
        for user in users {
            let _ = builder.add_user(user);
        }
        builder.add_repositories(repositories);
        builder.build()
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    /// Repositories whose owner is in `logins`, in table order.
    pub fn repositories_owned_by<'a>(&'a self, logins: &'a HashSet<&str>) -> impl Iterator<Item = &'a Repository> {
        self.repositories.iter().filter(|repo| logins.contains(repo.login.as_str()))
    }
}

/// Accumulates records during the harvest phase.
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    users: Vec<User>,
    repositories: Vec<Repository>,
    logins: HashSet<String>,
}

impl DatasetBuilder {
    /// Add a user, returning `false` if a user with the same login was already added.
    ///
    /// An empty login identifies nobody, so such users are never treated as duplicates.
    pub fn add_user(&mut self, user: User) -> bool {
        if !user.login.is_empty() && !self.logins.insert(user.login.clone()) {
            log::debug!(target: LOG_TARGET, "Ignoring duplicate user '{}'", user.login);
            return false;
        }

        self.users.push(user);
        true
    }

    pub fn add_repositories(&mut self, repositories: impl IntoIterator<Item = Repository>) {
        self.repositories.extend(repositories);
    }

    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Logins of the users added so far, in insertion order.
    #[must_use]
    pub fn logins(&self) -> Vec<String> {
        self.users.iter().map(|u| u.login.clone()).collect()
    }

    #[must_use]
    pub fn build(self) -> Dataset {
        Dataset {
            users: self.users,
            repositories: self.repositories,
        }
    }
}
