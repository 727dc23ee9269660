//! Storage traits and error types
//!
//! This module defines the key/value blob interface the record collections
//! are persisted through, and the errors its backends report.

use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Store lock poisoned: {0}")]
    Poisoned(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A persistent string-keyed store of string blobs
///
/// Each record collection is one blob holding a full JSON array. Writes
/// replace the whole value; there is no partial update.
pub trait BlobStore {
    /// Returns the blob stored under `key`, if any
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous blob
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`; returns whether it existed
    fn delete(&mut self, key: &str) -> StorageResult<bool>;

    /// All stored keys, sorted
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// When `key` was last written (RFC 3339), if it exists
    fn updated_at(&self, key: &str) -> StorageResult<Option<String>>;
}
