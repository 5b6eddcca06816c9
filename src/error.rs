use std::path::PathBuf;
use thiserror::Error;

/// Errors raised at the fallible edges: terminal I/O, config files, logging setup.
#[derive(Debug, Error)]
pub enum FolioError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[source] serde_json::Error),

    #[error("Could not determine config directory")]
    ConfigDir,

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, FolioError>;
