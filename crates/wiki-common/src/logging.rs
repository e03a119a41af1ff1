//! Structured logging infrastructure for the wiki bot

use crate::error::{Result, WikiError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

/// Output format of the log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line, human friendly output
    #[default]
    Pretty,
    /// Single-line output
    Compact,
    /// Newline-delimited JSON
    Json,
}

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "`wiki_commands=trace`")
    pub level: String,
    /// Line format
    pub format: LogFormat,
    /// Optional directory for daily rolling log files, stdout is used otherwise
    pub file_path: Option<PathBuf>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Keeps the background log writer alive.
///
/// Dropping it flushes and stops the file writer, so the binary must hold it
/// for as long as it runs.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Builds the level filter, letting `RUST_LOG` take precedence over the configured level.
pub fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize the tracing subscriber with the given configuration
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let (writer, worker, ansi) = match &config.file_path {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::daily(dir, "wiki-bot.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
        None => (BoxMakeWriter::new(std::io::stdout), None, true),
    };

    let base = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(config.include_targets)
        .with_thread_names(true);

    let layer: Box<dyn Layer<Registry> + Send + Sync> = match config.format {
        LogFormat::Pretty => Box::new(base.pretty()),
        LogFormat::Compact => Box::new(base.compact()),
        LogFormat::Json => Box::new(base.json()),
    };

    tracing_subscriber::registry()
        .with(layer)
        .with(env_filter(config))
        .try_init()
        .map_err(|e| WikiError::logging_with_source("Failed to install tracing subscriber", e))?;

    Ok(LoggingGuard { _worker: worker })
}
