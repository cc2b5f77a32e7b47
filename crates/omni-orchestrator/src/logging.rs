use std::fs;

use anyhow::Context;
use anyhow::Result;
use clap::ValueEnum;
use omni_configuration::Logging;
use serde::Deserialize;
use serde::Serialize;
use tracing::Level;
use tracing::event;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub const LOG_FILTER_VARIABLE: &str = "OMNI_LOG";

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn to_level_string(&self) -> String {
        match self {
            LogLevel::Trace => "trace".to_string(),
            LogLevel::Debug => "debug".to_string(),
            LogLevel::Info => "info".to_string(),
            LogLevel::Warn => "warn".to_string(),
            LogLevel::Error => "error".to_string(),
        }
    }
}

/// The explicit level wins over `OMNI_LOG`, which wins over `default`.
pub fn env_filter(log_level: Option<LogLevel>, default: LogLevel) -> EnvFilter {
    let directives = match log_level {
        Some(log_level) => log_level.to_level_string(),
        None => dotenvy::var(LOG_FILTER_VARIABLE).unwrap_or_else(|_| default.to_level_string()),
    };
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new(default.to_level_string()))
}

/// Installs the global subscriber: compact warnings on stderr and, when a log
/// directory is configured, JSON lines in `<log_directory>/<file_name>`. The
/// returned guard flushes the file writer and must be held until exit.
pub fn setup_logging(logging: &Logging, log_level: Option<LogLevel>) -> Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .with_filter(env_filter(log_level, LogLevel::Warn));

    let Some(log_directory) = &logging.log_directory else {
        tracing_subscriber::registry().with(stderr_layer).try_init()?;
        return Ok(None);
    };

    fs::create_dir_all(log_directory)
        .with_context(|| format!("could not create log directory {}", log_directory.display()))?;
    let file_appender = tracing_appender::rolling::never(log_directory, &logging.file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_current_span(true)
        .with_filter(env_filter(log_level, LogLevel::Info));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    event!(Level::INFO, log_directory = %log_directory.display(), "starting logging");
    Ok(Some(guard))
}
