//! Logging Setup
//!
//! Human-readable events go to stdout. The same events, request logs
//! included, are also written as JSON lines to `<log_dir>/app.<date>.log`,
//! rotated daily with the newest [`MAX_LOG_FILES`] files kept.

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "api=info,auth=info,todo=info,tower_http=info";
const LOG_FILE_PREFIX: &str = "app";
const LOG_FILE_SUFFIX: &str = "log";
pub const MAX_LOG_FILES: usize = 5;

/// Rolling writer for the JSON log file
pub fn file_appender(log_dir: &Path) -> anyhow::Result<RollingFileAppender> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(MAX_LOG_FILES)
        .build(log_dir)
        .with_context(|| format!("Cannot open log directory {}", log_dir.display()))
}

/// Install the global subscriber
///
/// The returned guard flushes the file writer on drop and must be held
/// for the lifetime of the process.
pub fn init(log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(log_dir)?);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_file_appender_writes_into_log_dir() {
        let dir = std::env::temp_dir().join(format!("todo-logs-{}", std::process::id()));

        let mut appender = file_appender(&dir).unwrap();
        appender.write_all(b"{\"message\":\"hello\"}\n").unwrap();
        appender.flush().unwrap();

        let files: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(files.len(), 1);
        assert!(files[0].starts_with("app."));
        assert!(files[0].ends_with(".log"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
