//! Structured logging and secret redaction.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and keeping Anthropic API keys out of
//! log sinks.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use crate::config::LoggingConfig;
use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

lazy_static! {
    static ref ANTHROPIC_KEY: Regex =
        Regex::new(r"sk-ant-[A-Za-z0-9_\-]+").expect("static regex is valid");
}

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line human-readable output.
/// - `pretty` (default): Multi-line, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    // Configure filter from environment or config file
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

/// Replaces every Anthropic API key (`sk-ant-...`) in `input` with
/// `[REDACTED_API_KEY]`.
///
/// Upstream error bodies are logged verbatim otherwise, and some of them echo
/// the rejected key back.
pub fn sanitize(input: &str) -> String {
    ANTHROPIC_KEY
        .replace_all(input, "[REDACTED_API_KEY]")
        .into_owned()
}
