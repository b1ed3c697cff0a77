use thiserror::Error;

use crate::domain::{RecordError, TransactionId};

/// Failures raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("transaction `{0}` not found")]
    NotFound(TransactionId),
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
}

/// Failures reported by the application store's mutating operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
    #[error("deleted {deleted} of {requested} transactions before failing: {source}")]
    PartialDelete {
        deleted: usize,
        requested: usize,
        #[source]
        source: StorageError,
    },
}

/// Failures while reading or writing the user configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
