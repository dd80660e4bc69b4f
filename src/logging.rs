//! Logging configuration using the tracing ecosystem.
//!
//! Logs go to a daily rotating file rather than the terminal, because stdout
//! carries tool results that the host parses.

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log level if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "llm_tools_jira=info,warn";

/// Initialize the logging system.
///
/// Logs are written to `<local data dir>/llm-tools-jira/logs/`. Set
/// `RUST_LOG=llm_tools_jira=debug` for request-level detail.
///
/// # Errors
///
/// Returns an error if:
/// - The log directory cannot be determined or created
/// - The tracing subscriber cannot be set
pub fn init() -> anyhow::Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "llm-tools-jira.log");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), log_dir = %log_dir.display(), "Logging initialized");

    Ok(())
}

fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("llm-tools-jira").join("logs"))
}
