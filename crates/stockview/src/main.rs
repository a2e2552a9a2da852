//! stockview: fetch a stock time series, show it, optionally save it.

use std::io;

use anyhow::Result;
use clap::Parser;
use stockview::{Config, Prompter, RunOutcome, TerminalChart, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = Config::parse();
    tracing::debug!(?config, "Starting stockview");

    let provider = config.provider()?;
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    match run(&provider, &TerminalChart, &mut prompter, &config.output_dir).await? {
        RunOutcome::FetchFailed(outcome) => {
            tracing::info!(?outcome, "Stopped after failed fetch");
        }
        RunOutcome::Completed { exported } => {
            tracing::info!(?exported, "Finished");
        }
    }
    Ok(())
}
