use clap::Parser;
use isd_aggregator::cli::{run, Cli};
use isd_aggregator::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
