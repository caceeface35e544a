use crate::Result;
use crate::harvest::HarvestSettings;
use crate::queries::QueryOptions;
use camino::Utf8Path;
use chrono::{DateTime, Utc};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// File name looked up in the current directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "census.toml";

/// Largest page size the GitHub REST API accepts.
const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// GitHub user search query selecting the population
    #[serde(default = "default_search_query")]
    pub search_query: String,

    /// Results requested per search page
    #[serde(default = "default_page_size")]
    pub search_page_size: u32,

    /// Repositories requested per page
    #[serde(default = "default_page_size")]
    pub repo_page_size: u32,

    /// Most repositories kept per user
    #[serde(default = "default_max_repos_per_user")]
    pub max_repos_per_user: usize,

    /// Minimum time between the start of consecutive requests
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub request_interval: Duration,

    /// Retries for failed or rate-limited requests
    #[serde(default)]
    pub max_retries: u32,

    /// Delay before the first retry
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub retry_base_delay: Duration,

    /// Root of the GitHub REST API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Users registered strictly after this instant count as recent joiners
    #[serde(default = "default_recent_join_cutoff")]
    pub recent_join_cutoff: DateTime<Utc>,
}

fn default_search_query() -> String {
    "location:zurich followers:>50".to_string()
}

const fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

const fn default_max_repos_per_user() -> usize {
    500
}

const fn default_interval() -> Duration {
    Duration::from_secs(1)
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_recent_join_cutoff() -> DateTime<Utc> {
    QueryOptions::default().recent_join_cutoff
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `census.toml` in the current directory is used if it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading gh-census configuration file '{path}'"))?;
            (path, text)
        } else {
            let path = Utf8Path::new(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading gh-census configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a page size, the repository cap, or the API base URL is out of range
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_PAGE_SIZE).contains(&self.search_page_size) {
            return Err(app_err!(
                "search_page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.search_page_size
            ));
        }

        if !(1..=MAX_PAGE_SIZE).contains(&self.repo_page_size) {
            return Err(app_err!(
                "repo_page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.repo_page_size
            ));
        }

        if self.max_repos_per_user == 0 {
            return Err(app_err!("max_repos_per_user must be at least 1"));
        }

        if self.search_query.trim().is_empty() {
            return Err(app_err!("search_query must not be empty"));
        }

        let url = Url::parse(&self.api_base_url).into_app_err_with(|| format!("parsing api_base_url '{}'", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(app_err!("api_base_url must use http or https, got '{}'", url.scheme()));
        }

        Ok(())
    }

    /// The harvest knobs described by this configuration, optionally with a different query.
    #[must_use]
    pub fn harvest_settings(&self, query: Option<&str>) -> HarvestSettings {
        HarvestSettings {
            query: query.unwrap_or(self.search_query.as_str()).to_string(),
            search_page_size: self.search_page_size,
            repo_page_size: self.repo_page_size,
            max_repos_per_user: self.max_repos_per_user,
            request_interval: self.request_interval,
        }
    }

    #[must_use]
    pub const fn query_options(&self) -> QueryOptions {
        QueryOptions {
            recent_join_cutoff: self.recent_join_cutoff,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
    }

    #[test]
    fn test_default_config_values() {
        let config = Config::default();
        assert_eq!(config.search_query, "location:zurich followers:>50");
        assert_eq!(config.search_page_size, 100);
        assert_eq!(config.repo_page_size, 100);
        assert_eq!(config.max_repos_per_user, 500);
        assert_eq!(config.request_interval, Duration::from_secs(1));
        assert_eq!(config.max_retries, 0);
        assert_eq!(config.api_base_url, "https://api.github.com");
        assert_eq!(config.recent_join_cutoff, QueryOptions::default().recent_join_cutoff);
    }

    #[test]
    fn test_empty_file_uses_field_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_overrides() {
        let config: Config = toml::from_str("search_query = \"location:bern\"\nrequest_interval = \"250ms\"\n").unwrap();
        assert_eq!(config.search_query, "location:bern");
        assert_eq!(config.request_interval, Duration::from_millis(250));
        assert_eq!(config.search_page_size, 100);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let _ = toml::from_str::<Config>("github_token = \"abc\"\n").unwrap_err();
    }

    #[test]
    fn test_validate_page_size_out_of_range() {
        let config = Config { search_page_size: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();

        let config = Config { repo_page_size: 101, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_zero_repo_cap() {
        let config = Config { max_repos_per_user: 0, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_blank_query() {
        let config = Config { search_query: "  ".to_string(), ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_base_url() {
        let config = Config { api_base_url: "ftp://example.com".to_string(), ..Config::default() };
        let _ = config.validate().unwrap_err();

        let config = Config { api_base_url: "not a url".to_string(), ..Config::default() };
        let _ = config.validate().unwrap_err();

        let config = Config { api_base_url: "http://127.0.0.1:8080".to_string(), ..Config::default() };
        config.validate().unwrap();
    }

    #[test]
    fn test_harvest_settings_query_override() {
        let config = Config::default();
        assert_eq!(config.harvest_settings(None).query, config.search_query);
        assert_eq!(config.harvest_settings(Some("location:basel")).query, "location:basel");
        assert_eq!(config.harvest_settings(None).max_repos_per_user, 500);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = Utf8PathBuf::try_from(tmp.path().join("census.toml")).unwrap();
        Config::save_default(&output_path).unwrap();
        let loaded = Config::load(Some(&output_path)).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_invalid_values_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("census.toml")).unwrap();
        fs::write(&path, "search_page_size = 500\n").unwrap();
        let _ = Config::load(Some(&path)).unwrap_err();
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let _ = Config::load(Some(Utf8Path::new("/definitely/not/here/census.toml"))).unwrap_err();
    }

    #[test]
    fn test_default_config_toml_is_not_empty() {
        assert!(!DEFAULT_CONFIG_TOML.is_empty());
    }
}
