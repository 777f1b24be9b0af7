//! secretsmanager - resolves secret references when a connection session opens
//!
//! This is the command-line entry point. It stands in for the host: it reads
//! session-open parameters, runs the session hooks, and prints the response.

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use logging::LogLevel;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = LogLevel::from_env_value(&cli.log_level);
    logging::init_tracing(level);
    info!(
        awslogger = level == LogLevel::Trace,
        "starting plugin secretsmanager"
    );

    match cli.command {
        Commands::SessionOpen(args) => commands::session_open::run(args).await,
        Commands::Parse(args) => commands::parse::run(args),
    }
}
