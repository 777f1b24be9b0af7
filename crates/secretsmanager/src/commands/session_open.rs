//! Session-open command: run the hook on a parameters document

use anyhow::{Context, Result};
use clap::Args;
use secretsmanager_core::{SessionParams, SessionParamsResponse};
use secretsmanager_secrets::{SecretsManagerHooks, SessionHooks};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct SessionOpenArgs {
    /// JSON file with session parameters (reads stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: SessionOpenArgs) -> Result<()> {
    let params = read_params(args.input.as_deref())?;

    let response = SecretsManagerHooks::new()
        .on_session_open(&params)
        .await
        .with_context(|| format!("Failed to open session {}", params.session_id))?;

    println!("{}", render_response(&response, args.pretty)?);
    Ok(())
}

/// Read parameters from a file, or stdin when no path is given
fn read_params(input: Option<&Path>) -> Result<SessionParams> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read session parameters: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read session parameters from stdin")?;
            buf
        }
    };

    serde_json::from_str(&content).context("Failed to parse session parameters")
}

fn render_response(response: &SessionParamsResponse, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    rendered.context("Failed to serialize session response")
}
