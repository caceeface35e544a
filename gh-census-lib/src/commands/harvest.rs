use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
pub struct HarvestArgs {
    /// Directory receiving `users.csv` and `repositories.csv`
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub out_dir: Utf8PathBuf,

    /// Search query overriding the configured `search_query`
    #[arg(long, short = 'q', value_name = "QUERY")]
    pub query: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn harvest_users<H: Host>(host: &mut H, args: &HarvestArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let dataset = common.harvest(args.query.as_deref()).await?;

    common.save(&dataset, &args.out_dir)
}
