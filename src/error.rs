use std::path::PathBuf;
use thiserror::Error;

/// Failures of the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("collection name must not be empty")]
    EmptyCollection,
}

/// Failures while fetching a question list.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("questions unavailable: {reason}")]
    DataUnavailable { reason: String },
}

impl SourceError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        SourceError::DataUnavailable {
            reason: reason.into(),
        }
    }
}

impl From<StoreError> for SourceError {
    fn from(err: StoreError) -> Self {
        SourceError::unavailable(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
