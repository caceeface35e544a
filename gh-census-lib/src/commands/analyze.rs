use super::Host;
use super::common::{Common, CommonArgs, ReportArgs};
use crate::Result;
use crate::dataset::{Dataset, REPOSITORIES_CSV, USERS_CSV};
use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Users table produced by `harvest`
    #[arg(long, value_name = "PATH", default_value = USERS_CSV)]
    pub users: Utf8PathBuf,

    /// Repositories table produced by `harvest`
    #[arg(long, value_name = "PATH", default_value = REPOSITORIES_CSV)]
    pub repos: Utf8PathBuf,

    #[command(flatten)]
    pub report: ReportArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub fn analyze_tables<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let dataset = Dataset::load(&args.users, &args.repos)?;

    common.report(&dataset, &args.report)
}
