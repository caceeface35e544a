//! CSV form of the user and repository tables.
//!
//! Cells are read as strings first and then coerced, so a malformed cell degrades to
//! its documented default instead of failing the whole load.

use super::normalize::{format_timestamp, parse_count, parse_timestamp};
use super::{Dataset, Repository, TriState, User};
use crate::Result;
use csv::{ReaderBuilder, StringRecord, Writer};
use ohno::IntoAppError;
use serde::Deserialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub const USERS_CSV: &str = "users.csv";
pub const REPOSITORIES_CSV: &str = "repositories.csv";

pub const USER_COLUMNS: [&str; 11] = [
    "login",
    "name",
    "company",
    "location",
    "email",
    "hireable",
    "bio",
    "public_repos",
    "followers",
    "following",
    "created_at",
];

pub const REPOSITORY_COLUMNS: [&str; 9] = [
    "login",
    "full_name",
    "created_at",
    "stargazers_count",
    "watchers_count",
    "language",
    "has_projects",
    "has_wiki",
    "license_name",
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct UserRow {
    login: Option<String>,
    name: Option<String>,
    company: Option<String>,
    location: Option<String>,
    email: Option<String>,
    hireable: Option<String>,
    bio: Option<String>,
    public_repos: Option<String>,
    followers: Option<String>,
    following: Option<String>,
    created_at: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            login: row.login.unwrap_or_default(),
            name: row.name.unwrap_or_default(),
            company: row.company.unwrap_or_default(),
            location: row.location.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
            hireable: row.hireable.as_deref().map_or(TriState::Unknown, TriState::parse),
            bio: row.bio.unwrap_or_default(),
            public_repos: row.public_repos.as_deref().map_or(0, parse_count),
            followers: row.followers.as_deref().map_or(0, parse_count),
            following: row.following.as_deref().map_or(0, parse_count),
            created_at: row.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RepositoryRow {
    login: Option<String>,
    full_name: Option<String>,
    created_at: Option<String>,
    stargazers_count: Option<String>,
    watchers_count: Option<String>,
    language: Option<String>,
    has_projects: Option<String>,
    has_wiki: Option<String>,
    license_name: Option<String>,
}

impl From<RepositoryRow> for Repository {
    fn from(row: RepositoryRow) -> Self {
        Self {
            login: row.login.unwrap_or_default(),
            full_name: row.full_name.unwrap_or_default(),
            created_at: row.created_at.as_deref().and_then(parse_timestamp),
            stargazers_count: row.stargazers_count.as_deref().map_or(0, parse_count),
            watchers_count: row.watchers_count.as_deref().map_or(0, parse_count),
            language: row.language.unwrap_or_default(),
            has_projects: row.has_projects.as_deref().map_or(TriState::Unknown, TriState::parse),
            has_wiki: row.has_wiki.as_deref().map_or(TriState::Unknown, TriState::parse),
            license_name: row.license_name.unwrap_or_default(),
        }
    }
}

/// Read rows of type `Row` from CSV text and convert each to `T`.
fn read_rows<Row, T>(input: impl Read, table: &str) -> Result<Vec<T>>
where
    Row: for<'de> Deserialize<'de>,
    T: From<Row>,
{
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
    let headers = reader
        .headers()
        .into_app_err_with(|| format!("reading the header of the {table} table"))?
        .clone();

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    while reader
        .read_record(&mut record)
        .into_app_err_with(|| format!("reading the {table} table"))?
    {
        let row: Row = record
            .deserialize(Some(&headers))
            .into_app_err_with(|| format!("decoding row {} of the {table} table", rows.len() + 1))?;
        rows.push(T::from(row));
    }

    Ok(rows)
}

pub fn read_users(input: impl Read) -> Result<Vec<User>> {
    read_rows::<UserRow, User>(input, "users")
}

pub fn read_repositories(input: impl Read) -> Result<Vec<Repository>> {
    read_rows::<RepositoryRow, Repository>(input, "repositories")
}

pub fn write_users<'a>(users: impl IntoIterator<Item = &'a User>, output: impl Write) -> Result<()> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(USER_COLUMNS)?;

    for user in users {
        writer.write_record([
            user.login.as_str(),
            user.name.as_str(),
            user.company.as_str(),
            user.location.as_str(),
            user.email.as_str(),
            &user.hireable.to_string(),
            user.bio.as_str(),
            &user.public_repos.to_string(),
            &user.followers.to_string(),
            &user.following.to_string(),
            &format_timestamp(user.created_at),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_repositories<'a>(repositories: impl IntoIterator<Item = &'a Repository>, output: impl Write) -> Result<()> {
    let mut writer = Writer::from_writer(output);
    writer.write_record(REPOSITORY_COLUMNS)?;

    for repo in repositories {
        writer.write_record([
            repo.login.as_str(),
            repo.full_name.as_str(),
            &format_timestamp(repo.created_at),
            &repo.stargazers_count.to_string(),
            &repo.watchers_count.to_string(),
            repo.language.as_str(),
            &repo.has_projects.to_string(),
            &repo.has_wiki.to_string(),
            repo.license_name.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

impl Dataset {
    /// Load both tables from CSV files.
    pub fn load(users_path: impl AsRef<Path>, repositories_path: impl AsRef<Path>) -> Result<Self> {
        let users_path = users_path.as_ref();
        let repositories_path = repositories_path.as_ref();

        let users_file = File::open(users_path).into_app_err_with(|| format!("opening users table '{}'", users_path.display()))?;
        let users = read_users(users_file)?;

        let repos_file = File::open(repositories_path)
            .into_app_err_with(|| format!("opening repositories table '{}'", repositories_path.display()))?;
        let repositories = read_repositories(repos_file)?;

        Ok(Self::new(users, repositories))
    }

    /// Write both tables as `users.csv` and `repositories.csv` into `dir`.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).into_app_err_with(|| format!("creating output directory '{}'", dir.display()))?;

        let users_path = dir.join(USERS_CSV);
        let users_file = File::create(&users_path).into_app_err_with(|| format!("creating '{}'", users_path.display()))?;
        write_users(self.users(), users_file)?;

        let repos_path = dir.join(REPOSITORIES_CSV);
        let repos_file = File::create(&repos_path).into_app_err_with(|| format!("creating '{}'", repos_path.display()))?;
        write_repositories(self.repositories(), repos_file)?;

        Ok(())
    }
}
