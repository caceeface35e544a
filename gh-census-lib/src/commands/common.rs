//! Shared setup and output logic for the harvest, analyze, and run commands.

use super::ProgressReporter;
use super::config::Config;
use crate::Result;
use crate::dataset::Dataset;
use crate::harvest::{GitHubSource, Harvester, Progress, RetryingSource};
use crate::queries::answer_all;
use crate::reports::{generate_console, generate_json};
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, ValueEnum};
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::{IsTerminal, Write};

const LOG_TARGET: &str = "  commands";

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    fn resolve(self, is_terminal: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by every command that loads a configuration
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Path to configuration file (default is `census.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Where answers go once computed
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Write the answers to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Suppress the console listing of answers
    #[arg(long, help_heading = "Report Output")]
    pub no_console: bool,
}

pub struct Common<'a, H: super::Host> {
    pub config: Config,
    host: &'a mut H,
    github_token: Option<String>,
    color: ColorMode,
    log_level: LogLevel,
}

impl<'a, H: super::Host> Common<'a, H> {
    /// Set up logging and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded
    pub fn new(host: &'a mut H, args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(args.config.as_deref())?;
        log::debug!(target: LOG_TARGET, "Using configuration {config:?}");

        Ok(Self {
            config,
            host,
            github_token: args.github_token.clone(),
            color: args.color,
            log_level: args.log_level,
        })
    }

    /// Harvest the configured population from GitHub.
    ///
    /// # Errors
    ///
    /// Returns an error if the GitHub client cannot be constructed
    pub async fn harvest(&self, query: Option<&str>) -> Result<Dataset> {
        if self.github_token.is_none() {
            log::warn!(target: LOG_TARGET, "No GitHub token provided, requests are subject to the anonymous rate limit");
        }

        let source = GitHubSource::new(self.github_token.as_deref(), &self.config.api_base_url)?;
        let source = RetryingSource::new(source, self.config.max_retries, self.config.retry_base_delay);
        let harvester = Harvester::new(source, self.config.harvest_settings(query));

        // With logging enabled the progress bar would fight the log lines, so keep it hidden.
        let delay = if self.log_level == LogLevel::None {
            Duration::from_millis(300)
        } else {
            Duration::from_hours(365 * 24)
        };

        let progress = ProgressReporter::new(delay, self.color.resolve(|| std::io::stderr().is_terminal()));
        let dataset = harvester.harvest(&progress).await;
        progress.done();

        log::info!(
            target: LOG_TARGET,
            "Harvested {} users and {} repositories",
            dataset.users().len(),
            dataset.repositories().len()
        );

        Ok(dataset)
    }

    /// Write `users.csv` and `repositories.csv` into `out_dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or either file cannot be written
    pub fn save(&mut self, dataset: &Dataset, out_dir: &Utf8Path) -> Result<()> {
        fs::create_dir_all(out_dir).into_app_err_with(|| format!("creating output directory '{out_dir}'"))?;
        dataset.save(out_dir)?;

        let _ = writeln!(
            self.host.error(),
            "Wrote {} users and {} repositories to {out_dir}",
            dataset.users().len(),
            dataset.repositories().len()
        );
        Ok(())
    }

    /// Answer every question and emit the configured reports.
    ///
    /// # Errors
    ///
    /// Returns an error if a report cannot be rendered or written
    pub fn report(&mut self, dataset: &Dataset, args: &ReportArgs) -> Result<()> {
        let answers = answer_all(dataset, &self.config.query_options());

        if !args.no_console {
            let mut console_output = String::new();
            let use_colors = self.color.resolve(|| std::io::stdout().is_terminal());
            generate_console(&answers, use_colors, &mut console_output)?;
            let _ = write!(self.host.output(), "{console_output}");
        }

        if let Some(filename) = &args.json {
            let mut json_output = String::new();
            generate_json(&answers, &mut json_output)?;
            fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
        }

        Ok(())
    }
}

/// Initialize logger based on log level
fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // A second command in the same process keeps the first logger.
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_resolve() {
        assert!(ColorMode::Always.resolve(|| false));
        assert!(!ColorMode::Never.resolve(|| true));
        assert!(ColorMode::Auto.resolve(|| true));
        assert!(!ColorMode::Auto.resolve(|| false));
    }

    #[test]
    fn test_init_logging_twice_is_harmless() {
        init_logging(LogLevel::Warn);
        init_logging(LogLevel::Debug);
        init_logging(LogLevel::None);
    }
}
