//! Expert registry CLI
//!
//! Command-line front end over the expert, GRNTI and place services.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use infrastructure::{AppConfig, create_pool, init_telemetry};
use presentation_cli::{Cli, Services, execute, log_filter_from_verbosity};
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let mut config = AppConfig::load()?;

    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.logging.filter = filter.to_string();
    }
    if let Some(path) = cli.database {
        config.database.path = path.to_string_lossy().into_owned();
    }

    init_telemetry(&config.logging)?;
    debug!(database = %config.database.path, "Configuration loaded");

    let pool = Arc::new(create_pool(&config.database)?);
    let services = Services::new(&pool);

    execute(cli.command, &services).await?.render()
}
