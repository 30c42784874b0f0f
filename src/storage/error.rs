//! Storage and persistence error types.

use thiserror::Error;

/// Errors raised by a [`Storage`](super::Storage) backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Failure to load or persist the event log.
///
/// Never fatal: the engine keeps working from memory and hands this back
/// so the caller can warn that history may not survive a restart.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage failure on '{key}': {source}")]
    Storage {
        key: String,
        #[source]
        source: StorageError,
    },

    #[error("Could not encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored log '{key}' is corrupt: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    /// Storage key the failure relates to.
    pub fn key(&self) -> &str {
        match self {
            Self::Storage { key, .. } | Self::Encode { key, .. } | Self::Decode { key, .. } => key,
        }
    }
}
