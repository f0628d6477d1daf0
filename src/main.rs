use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use parliament_ids::cli::Args;
use parliament_ids::config::Config;
use parliament_ids::logger;
use parliament_ids::orchestrator::{App, RunOptions};

#[tokio::main]
async fn main() -> Result<()> {
    logger::init();

    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("could not load configuration")?;
    if let Some(path) = args.driver_path {
        config.chrome_executable = Some(path);
    }

    let options = RunOptions {
        kind: args.kind,
        full: args.full,
        caching: !args.no_cache,
    };

    let summary = App::initialize(config, options, args.driver).await?.run().await?;
    if !summary.is_complete() {
        error!(
            "{} legislatures failed, run again with --full to retry them",
            summary.failed.len()
        );
    }

    Ok(())
}
