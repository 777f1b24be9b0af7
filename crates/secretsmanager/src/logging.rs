//! Tracing setup driven by `LOG_LEVEL`
//!
//! Lines are JSON on stderr, without timestamps; the host adds its own.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Targets emitted by the AWS SDK and its HTTP stack
const AWS_TARGETS: [&str; 6] = [
    "aws_config",
    "aws_sdk_secretsmanager",
    "aws_sigv4",
    "aws_smithy_http",
    "aws_smithy_runtime",
    "aws_smithy_runtime_api",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Debug,
    /// Debug, plus AWS SDK request/response tracing
    Trace,
}

impl LogLevel {
    /// Map a `LOG_LEVEL` value; unrecognized values fall back to info
    pub fn from_env_value(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }

    /// `EnvFilter` directives for this level
    pub fn filter_directives(self) -> String {
        let (base, aws) = match self {
            LogLevel::Info => ("info", "warn"),
            LogLevel::Debug => ("debug", "warn"),
            LogLevel::Trace => ("debug", "trace"),
        };

        std::iter::once(base.to_string())
            .chain(AWS_TARGETS.iter().map(|target| format!("{target}={aws}")))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Initialize tracing at the given level
pub fn init_tracing(level: LogLevel) {
    let filter = EnvFilter::new(level.filter_directives());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .without_time()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
