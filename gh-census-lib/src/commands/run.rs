//! Command dispatch logic for gh-census

use super::{AnalyzeArgs, HarvestArgs, InitArgs, PipelineArgs, analyze_tables, harvest_users, init_config, run_pipeline};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use std::io::Write;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "gh-census", author, version, long_about = None)]
#[command(about = "Harvest the GitHub users of a region and answer questions about them")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: CensusSubcommand,
}

#[derive(Subcommand, Debug)]
enum CensusSubcommand {
    /// Harvest users and their repositories into CSV tables
    Harvest(Box<HarvestArgs>),
    /// Answer the census questions from previously harvested tables
    Analyze(Box<AnalyzeArgs>),
    /// Harvest, save the tables, and answer the census questions
    Run(Box<PipelineArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests land here too and go to stdout.
            let rendered = e.render().to_string();
            if e.use_stderr() {
                let _ = write!(host.error(), "{rendered}");
            } else {
                let _ = write!(host.output(), "{rendered}");
            }
            host.exit(e.exit_code());
            return Ok(());
        }
    };

    match &cli.command {
        CensusSubcommand::Harvest(args) => harvest_users(host, args).await,
        CensusSubcommand::Analyze(args) => analyze_tables(host, args),
        CensusSubcommand::Run(args) => run_pipeline(host, args).await,
        CensusSubcommand::Init(args) => init_config(host, args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use std::fs;

    #[tokio::test]
    async fn test_help_goes_to_output() {
        let mut host = TestHost::default();
        run(&mut host, ["gh-census", "--help"]).await.unwrap();

        assert!(host.output_str().contains("harvest"));
        assert!(host.output_str().contains("analyze"));
        assert_eq!(host.exit_code, Some(0));
    }

    #[tokio::test]
    async fn test_unknown_subcommand_reports_error() {
        let mut host = TestHost::default();
        run(&mut host, ["gh-census", "frobnicate"]).await.unwrap();

        assert!(host.error_str().contains("frobnicate"));
        assert_eq!(host.exit_code, Some(2));
    }

    #[tokio::test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    async fn test_init_then_analyze() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("census.toml");
        let users_path = tmp.path().join("users.csv");
        let repos_path = tmp.path().join("repositories.csv");

        fs::write(
            &users_path,
            "login,name,company,location,email,hireable,bio,public_repos,followers,following,created_at\n\
             ann,Ann Lee,ACME,Zurich,ann@example.com,true,,3,120,4,2019-01-01T00:00:00Z\n\
             bob,Bob Lee,ACME,Zurich,,,builds things,1,80,2,2021-06-01T00:00:00Z\n",
        )
        .unwrap();
        fs::write(
            &repos_path,
            "login,full_name,created_at,stargazers_count,watchers_count,language,has_projects,has_wiki,license_name\n\
             ann,tool,2024-01-06T10:00:00Z,5,5,Rust,true,true,mit\n\
             bob,site,2024-01-08T10:00:00Z,1,1,Go,false,true,\n",
        )
        .unwrap();

        let mut host = TestHost::default();
        run(&mut host, ["gh-census", "init", config_path.to_str().unwrap()]).await.unwrap();
        assert!(config_path.exists());
        assert!(host.output_str().contains("Generated default configuration file"));

        let mut host = TestHost::default();
        run(
            &mut host,
            [
                "gh-census",
                "analyze",
                "--users",
                users_path.to_str().unwrap(),
                "--repos",
                repos_path.to_str().unwrap(),
                "--config",
                config_path.to_str().unwrap(),
                "--color",
                "never",
            ],
        )
        .await
        .unwrap();

        let output = host.output_str();
        assert_eq!(output.lines().count(), 16);
        assert!(output.starts_with("1. Top 5 users by followers: ann,bob\n"));
        assert!(output.contains("4. Majority company: ACME\n"));
        assert!(output.contains("16. Most common surname(s): Lee\n"));
    }

    #[tokio::test]
    async fn test_analyze_missing_tables_fails() {
        let mut host = TestHost::default();
        let result = run(
            &mut host,
            ["gh-census", "analyze", "--users", "/no/such/users.csv", "--repos", "/no/such/repositories.csv"],
        )
        .await;
        let _ = result.unwrap_err();
    }
}
