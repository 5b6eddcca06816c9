//! File logging. The terminal belongs to the UI, so every event goes to a
//! daily-rolling log file instead of stdout.

use crate::error::{FolioError, Result};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

const LOG_FILE: &str = "oma-folio.log";

/// Keeps the background writer alive; logs are flushed when it drops
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Where logs go when no directory is given
pub fn default_log_dir() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .map(|dir| dir.join("oma-folio"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Filter directive used when `RUST_LOG` is not set
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "oma_folio=debug,info"
    } else {
        "info"
    }
}

/// Install the global subscriber: `RUST_LOG` wins, otherwise `info`
/// (`debug` for this crate with `verbose`).
pub fn init_logging(log_dir: Option<PathBuf>, verbose: bool) -> Result<LoggingGuard> {
    let log_dir = log_dir.unwrap_or_else(default_log_dir);
    std::fs::create_dir_all(&log_dir)?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let file_appender = rolling::daily(&log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    Registry::default()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .map_err(|e| FolioError::Logging(e.to_string()))?;

    tracing::info!(dir = %log_dir.display(), "logging initialized");

    Ok(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        assert!(default_directive(true).contains("oma_folio=debug"));
    }

    #[test]
    fn test_default_log_dir_is_app_specific() {
        assert!(default_log_dir().ends_with("oma-folio") || default_log_dir().ends_with("logs"));
    }

    #[test]
    fn test_init_creates_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        // Only one global subscriber per process; a second init reports an error
        match init_logging(Some(log_dir.clone()), true) {
            Ok(guard) => assert_eq!(guard.log_dir(), log_dir.as_path()),
            Err(err) => assert!(matches!(err, FolioError::Logging(_))),
        }
        assert!(log_dir.is_dir());
    }
}
