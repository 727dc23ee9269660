//! Storage module for persisting record collections
//!
//! This module handles everything that survives between page loads:
//! - The `BlobStore` key/value interface and its SQLite and in-memory backends
//! - `RecordRepository`, which maps one collection to one JSON blob
//! - `merge`, the duplicate-free append step

mod memory;
mod merge;
mod repository;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryBlobStore;
pub use merge::merge;
pub use repository::{shared, RecordRepository, SharedStore};
pub use sqlite::SqliteBlobStore;
pub use traits::{BlobStore, StorageError, StorageResult};

use std::path::Path;

/// Opens the SQLite blob store at `path` for sharing
pub fn open_storage(path: &Path) -> StorageResult<SharedStore> {
    Ok(shared(SqliteBlobStore::new(path)?))
}
