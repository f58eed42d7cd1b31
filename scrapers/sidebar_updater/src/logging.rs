use anyhow::{Context, Result};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;

/// Daily rotating `<prefix>.<date>.log` files, keeping at most `max_files`.
/// Returns `None` when file logging is switched off.
pub fn file_appender(config: &LoggingConfig) -> Result<Option<RollingFileAppender>> {
    if config.directory.trim().is_empty() {
        return Ok(None);
    }

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(config.file_prefix.as_str())
        .filename_suffix("log")
        .max_log_files(config.max_files.max(1))
        .build(&config.directory)
        .with_context(|| format!("Creating log directory {}", config.directory))?;
    Ok(Some(appender))
}

/// Console output plus the optional log file, both filtered by `RUST_LOG`
/// (default `info`). Keep the returned guard alive so buffered lines get flushed.
pub fn init_tracing(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match file_appender(config)? {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init();
    Ok(guard)
}
