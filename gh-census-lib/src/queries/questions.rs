//! The sixteen questions.
//!
//! Each function borrows the dataset read-only and keeps any derived columns in local
//! vectors, so questions can run in any order, any number of times.

use super::answer::Answer;
use super::stats::{frequency_ranking, mean, ols_slope, pearson, top_k_by};
use crate::HashSet;
use crate::dataset::{Dataset, Repository, User};
use chrono::{DateTime, TimeZone, Utc};
use std::collections::BTreeMap;

pub const NO_COMPANY_DATA: &str = "No company data available";
pub const NO_LANGUAGE_DATA: &str = "No language data available";
pub const NOT_ENOUGH_LANGUAGE_DATA: &str = "Not enough language data";
pub const NOT_ENOUGH_HIREABLE_DATA: &str = "Not enough hireable data";
pub const NO_NAME_DATA: &str = "No name data available";
pub const NO_SURNAME_DATA: &str = "No surname data available";

/// Parameters that some questions depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryOptions {
    /// Users created strictly after this instant count as recent joiners.
    pub recent_join_cutoff: DateTime<Utc>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            recent_join_cutoff: Utc.with_ymd_and_hms(2020, 12, 31, 0, 0, 0).single().unwrap_or_default(),
        }
    }
}

#[expect(clippy::cast_precision_loss, reason = "counts are far below 2^52")]
const fn as_f64(n: u64) -> f64 {
    n as f64
}

fn logins<'a>(users: impl IntoIterator<Item = &'a User>) -> Answer {
    Answer::list(users.into_iter().map(|u| u.login.as_str()))
}

fn non_empty<'a>(values: impl IntoIterator<Item = &'a str>) -> impl Iterator<Item = &'a str> {
    values.into_iter().filter(|v| !v.is_empty())
}

fn languages<'a>(repos: impl IntoIterator<Item = &'a Repository>) -> impl Iterator<Item = &'a str> {
    non_empty(repos.into_iter().map(|r| r.language.as_str()))
}

/// Top 5 users by followers.
pub fn top_followers(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    logins(top_k_by(dataset.users(), 5, |u| as_f64(u.followers)))
}

/// The 5 earliest registered users; unknown registration times sort last.
pub fn earliest_registered(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let mut users: Vec<&User> = dataset.users().iter().collect();
    users.sort_by_key(|u| (u.created_at.is_none(), u.created_at));
    logins(users.into_iter().take(5))
}

/// The 3 most popular licenses, ignoring repositories without one.
pub fn top_licenses(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let ranking = frequency_ranking(non_empty(dataset.repositories().iter().map(|r| r.license_name.as_str())));
    Answer::list(ranking.into_iter().take(3).map(|(license, _)| license))
}

/// The company most users work at.
pub fn majority_company(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    frequency_ranking(non_empty(dataset.users().iter().map(|u| u.company.as_str())))
        .first()
        .map_or(Answer::NoData(NO_COMPANY_DATA), |(company, _)| Answer::Value((*company).to_string()))
}

/// The most popular repository language.
pub fn most_popular_language(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    frequency_ranking(languages(dataset.repositories()))
        .first()
        .map_or(Answer::NoData(NO_LANGUAGE_DATA), |(language, _)| Answer::Value((*language).to_string()))
}

/// The second most popular language among users who joined after the cutoff.
pub fn second_language_of_recent_joiners(dataset: &Dataset, options: &QueryOptions) -> Answer {
    let recent: HashSet<&str> = dataset
        .users()
        .iter()
        .filter(|u| u.created_at.is_some_and(|ts| ts > options.recent_join_cutoff))
        .map(|u| u.login.as_str())
        .collect();

    let ranking = frequency_ranking(languages(dataset.repositories_owned_by(&recent)));
    ranking
        .get(1)
        .map_or(Answer::NoData(NOT_ENOUGH_LANGUAGE_DATA), |(language, _)| Answer::Value((*language).to_string()))
}

/// The language with the highest mean stars per repository.
///
/// Languages are visited in ascending order and the first maximum wins.
pub fn highest_average_stars(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let mut stars_by_language: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for repo in dataset.repositories().iter().filter(|r| !r.language.is_empty()) {
        stars_by_language
            .entry(repo.language.as_str())
            .or_default()
            .push(as_f64(repo.stargazers_count));
    }

    let mut best: Option<(&str, f64)> = None;
    for (language, stars) in &stars_by_language {
        let Some(avg) = mean(stars) else { continue };
        if best.is_none_or(|(_, top)| avg > top) {
            best = Some((*language, avg));
        }
    }

    best.map_or(Answer::NoData(NO_LANGUAGE_DATA), |(language, _)| Answer::Value(language.to_string()))
}

/// Top 5 users by `followers / (1 + following)`.
pub fn top_leader_strength(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    logins(top_k_by(dataset.users(), 5, |u| u.leader_strength()))
}

/// Pearson correlation between followers and public repositories.
pub fn followers_repos_correlation(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let followers: Vec<f64> = dataset.users().iter().map(|u| as_f64(u.followers)).collect();
    let repos: Vec<f64> = dataset.users().iter().map(|u| as_f64(u.public_repos)).collect();
    Answer::number(pearson(&followers, &repos))
}

/// Regression slope of followers on public repositories.
pub fn followers_per_repo_slope(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let repos: Vec<f64> = dataset.users().iter().map(|u| as_f64(u.public_repos)).collect();
    let followers: Vec<f64> = dataset.users().iter().map(|u| as_f64(u.followers)).collect();
    Answer::number(ols_slope(&repos, &followers))
}

/// Correlation between projects and wiki being enabled, over repositories where both are known.
pub fn projects_wiki_correlation(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let (projects, wiki): (Vec<f64>, Vec<f64>) = dataset
        .repositories()
        .iter()
        .filter_map(|r| Some((r.has_projects.encode()?, r.has_wiki.encode()?)))
        .unzip();
    Answer::number(pearson(&projects, &wiki))
}

/// Split users into hireable and the rest. Unknown hireability counts as not hireable.
fn hireable_partition(users: &[User]) -> (Vec<&User>, Vec<&User>) {
    users.iter().partition(|u| u.hireable.is_true())
}

/// Mean following of hireable users minus the mean of everyone else.
pub fn hireable_following_difference(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let (hireable, rest) = hireable_partition(dataset.users());
    let following = |group: &[&User]| mean(&group.iter().map(|u| as_f64(u.following)).collect::<Vec<_>>());

    match (following(&hireable), following(&rest)) {
        (Some(h), Some(r)) => Answer::number(h - r),
        _ => Answer::NoData(NOT_ENOUGH_HIREABLE_DATA),
    }
}

/// Regression slope of followers on bio length in words, over users with a bio.
pub fn followers_per_bio_word_slope(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let (words, followers): (Vec<f64>, Vec<f64>) = dataset
        .users()
        .iter()
        .filter(|u| !u.bio.is_empty())
        .map(|u| (as_f64(u.bio_word_count() as u64), as_f64(u.followers)))
        .unzip();
    Answer::number(ols_slope(&words, &followers))
}

/// Top 5 users by number of repositories created on a weekend (UTC).
pub fn top_weekend_creators(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let ranking = frequency_ranking(
        dataset
            .repositories()
            .iter()
            .filter(|r| r.created_on_weekend())
            .map(|r| r.login.as_str()),
    );
    Answer::list(ranking.into_iter().take(5).map(|(login, _)| login))
}

/// Share of hireable users with an email minus the share among everyone else.
pub fn hireable_email_difference(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let (hireable, rest) = hireable_partition(dataset.users());
    let with_email = |group: &[&User]| {
        mean(
            &group
                .iter()
                .map(|u| if u.email.is_empty() { 0.0 } else { 1.0 })
                .collect::<Vec<_>>(),
        )
    };

    match (with_email(&hireable), with_email(&rest)) {
        (Some(h), Some(r)) => Answer::number(h - r),
        _ => Answer::NoData(NOT_ENOUGH_HIREABLE_DATA),
    }
}

/// The most common surname, or all tied surnames in alphabetical order.
pub fn most_common_surname(dataset: &Dataset, _options: &QueryOptions) -> Answer {
    let named: Vec<&User> = dataset.users().iter().filter(|u| !u.name.is_empty()).collect();
    if named.is_empty() {
        return Answer::NoData(NO_NAME_DATA);
    }

    let ranking = frequency_ranking(named.iter().filter_map(|u| u.surname()));
    let Some(&(_, max_count)) = ranking.first() else {
        return Answer::NoData(NO_SURNAME_DATA);
    };

    let mut surnames: Vec<&str> = ranking
        .into_iter()
        .take_while(|&(_, count)| count == max_count)
        .map(|(surname, _)| surname)
        .collect();
    surnames.sort_unstable();
    Answer::list(surnames)
}
