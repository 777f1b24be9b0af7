//! CLI argument parsing with clap

use clap::{Parser, Subcommand};

pub use crate::commands::parse::ParseArgs;
pub use crate::commands::session_open::SessionOpenArgs;

/// secretsmanager - resolve secret references in connection settings
#[derive(Parser, Debug)]
#[command(name = "secretsmanager")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log level: info, debug, or trace (trace also logs AWS SDK traffic)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the session-open hook on a JSON parameters document
    SessionOpen(SessionOpenArgs),

    /// Parse a secret reference without resolving it
    Parse(ParseArgs),
}
