//! Command-line interface and orchestration for gh-census
//!
//! This module implements the CLI commands and wires the harvester, the dataset
//! tables, the question engine, and the reports into end-to-end workflows.
//!
//! # Commands
//!
//! - **harvest**: Search GitHub, fetch every matching profile and its repositories,
//!   and write `users.csv` and `repositories.csv`
//! - **analyze**: Load both tables and answer the sixteen questions
//! - **run**: Harvest, save the tables, and answer the questions over the fresh snapshot
//! - **init**: Generate a default configuration file
//!
//! The `run` function parses command-line arguments using clap and routes to the
//! appropriate handler. The `common` module holds the shared pieces: logging setup,
//! color mode handling, configuration loading, and report emission.
//!
//! Configuration is a TOML file (`census.toml` by default) whose fields are
//! described in `default_config.toml`.

mod analyze;
mod common;
mod config;
mod harvest;
mod host;
mod init;
mod pipeline;
mod progress_reporter;
mod run;

#[cfg(debug_assertions)]
pub use config::Config;

pub use analyze::{AnalyzeArgs, analyze_tables};
pub use harvest::{HarvestArgs, harvest_users};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use pipeline::{PipelineArgs, run_pipeline};
pub use progress_reporter::ProgressReporter;
pub use run::run;
