//! Error types for weatherly-store.

use std::path::PathBuf;

use weatherly_core::CacheError;

/// Result type for weatherly-store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in weatherly-store.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Database error from SQLite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Failed to create database directory.
    #[error("Failed to create database directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to delete the database at session end.
    #[error("Failed to remove session database {path}: {source}")]
    RemoveFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A previous holder of the connection panicked.
    #[error("Session store lock poisoned")]
    LockPoisoned,
}

impl From<Error> for CacheError {
    fn from(err: Error) -> Self {
        match err {
            Error::LockPoisoned => CacheError::Unavailable(err.to_string()),
            other => CacheError::Backend(other.to_string()),
        }
    }
}
