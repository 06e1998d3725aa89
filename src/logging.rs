//! Logging setup
//!
//! Console output through `tracing-subscriber`, plus an optional daily
//! rolling log file. `RUST_LOG` overrides the configured level.

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "address-book";
const LOG_FILE_SUFFIX: &str = "log";
const MAX_LOG_FILES: usize = 5;

/// Keeps the file writer alive; hold it until shutdown
#[must_use = "Dropping the guard stops the background log writer"]
#[derive(Debug)]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Filter directive derived from config
fn directive(config: &LoggingConfig) -> &str {
    if config.debug {
        "debug"
    } else {
        &config.level
    }
}

/// Build the env filter, preferring RUST_LOG
fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(directive(config))
            .map_err(|e| Error::Logging(format!("Invalid log level {:?}: {}", config.level, e))),
    }
}

/// Install the global subscriber
pub fn init(config: &LoggingConfig) -> Result<LogGuard> {
    let filter = env_filter(config)?;

    let mut layers = vec![fmt::layer().compact().boxed()];

    let guard = match &config.directory {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(MAX_LOG_FILES)
                .build(dir)
                .map_err(|e| Error::Logging(format!("Failed to open log file: {}", e)))?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            layers.push(fmt::layer().with_writer(writer).with_ansi(false).boxed());
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))?;

    Ok(LogGuard { _file: guard })
}
