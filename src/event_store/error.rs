//! Event store errors

use std::path::PathBuf;

use crate::utils::AtomicError;

/// Result type for EventStore operations
pub type EventStoreResult<T> = Result<T, EventStoreError>;

/// Errors that can occur in EventStore operations
#[derive(Debug, thiserror::Error)]
pub enum EventStoreError {
    #[error("event with id {0} not found")]
    NotFound(String),

    #[error("event with id {0} already exists")]
    AlreadyExists(String),

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("data file {path:?} is malformed: {source}")]
    Corrupted {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize events: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to persist events: {0}")]
    Persistence(#[from] AtomicError),
}

impl EventStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EventStoreError::NotFound(_))
    }
}
