//! Structured logging and security-focused trace utilities.
//!
//! This module configures the `tracing` ecosystem for the application,
//! supporting multiple output formats and providing utilities to prevent
//! the Gemini API key from leaking into logs.

use crate::config::LoggingConfig;
use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static SANITIZE: AtomicBool = AtomicBool::new(true);

/// Initializes the global tracing subscriber for the application.
///
/// Supports three output formats:
/// - `json`: Structured JSON logs for production ingestion.
/// - `compact`: Single-line output for dense terminals.
/// - `pretty` (default): Human-readable, colorized output for development.
///
/// Log levels are controlled via the `RUST_LOG` environment variable or
/// the provided `LoggingConfig`.
pub fn init(config: &LoggingConfig) -> Result<()> {
    SANITIZE.store(config.sanitize_keys, Ordering::Relaxed);

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

/// Sanitizes the API key out of log messages.
///
/// The key travels as a `key` query parameter, and both reqwest errors and
/// upstream error bodies can echo the full request URL. This function
/// replaces the parameter value with a `[REDACTED]` placeholder wherever
/// it appears.
///
/// # Arguments
///
/// * `input` - The raw string that may contain the request URL.
///
/// # Returns
///
/// A new string with the key value replaced.
pub fn sanitize(input: &str) -> String {
    if !SANITIZE.load(Ordering::Relaxed) {
        return input.to_string();
    }

    let mut result = input.to_string();

    for marker in ["?key=", "&key="] {
        if let Some(pos) = result.find(marker) {
            let start = pos + marker.len();
            // Search for the end of the value (delimiter or end of string)
            let end = result[start..]
                .find(|c: char| c.is_whitespace() || c == '&' || c == '"' || c == '\'')
                .map(|i| start + i)
                .unwrap_or(result.len());
            result.replace_range(start..end, "[REDACTED_API_KEY]");
        }
    }

    result
}
