use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use powsign_cli::commands::{self, Outcome};
use powsign_cli::Cli;
use powsign_core::Config;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Logs go to stderr so stdout carries only the pipeline payload.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<Outcome> {
    let config = Config::from_env()?;
    let mut stdout = io::stdout().lock();
    commands::execute(cli, config, io::stdin().lock(), &mut stdout)
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match run(cli) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
