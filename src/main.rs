#![deny(clippy::all, clippy::pedantic)]

use std::process::ExitCode;

use clap::Parser;
use restcmd::{args::Cli, config, error::CliError, outcome::report_error, telemetry};
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            debug!(error = ?error, exit_code = error.exit_code(), "command failed");
            report_error(&mut std::io::stderr(), &error);
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let settings = config::load(&cli)?;
    telemetry::init(&settings.logging)?;

    let (resource, args) = cli.command.into_parts();
    restcmd::run(&settings, resource, args).await
}
