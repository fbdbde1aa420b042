mod cli;
mod report;

use anyhow::Context;
use clap::Parser;
use ietf_info_fetch::{HttpFetcher, LookupClient};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("ietf-info v{}", env!("CARGO_PKG_VERSION"));

    let criteria = cli.criteria().context("invalid search criteria")?;
    let fetcher = HttpFetcher::new(cli.timeout()).context("building HTTP client")?;
    let client = LookupClient::new(fetcher, cli.endpoints());

    let report = ietf_info_classify::run(&client, &cli.run_options(), &criteria)
        .await
        .context("aborted")?;

    report::print_report(
        &mut std::io::stdout().lock(),
        &report,
        criteria.name(),
        cli.verbose,
    )?;
    Ok(())
}
