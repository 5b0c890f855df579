//! coauthor-pr binary entrypoint

mod cli;

use anstream::eprintln;
use clap::Parser;
use cli::style::Stylize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "coauthor_pr=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::Cli::parse();

    match cli::run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", "error:".error());
            ExitCode::FAILURE
        }
    }
}
