use crate::storage::traits::{BlobStore, StorageResult};
use chrono::Utc;
use std::collections::BTreeMap;

/// In-process blob store
///
/// Nothing survives the process. Stands in for the SQLite store wherever a
/// driver or repository is exercised without a database file.
#[derive(Debug, Default, Clone)]
pub struct MemoryBlobStore {
    entries: BTreeMap<String, (String, String)>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a blob, e.g. a pre-existing or corrupt collection
    pub fn with_blob(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    fn insert(&mut self, key: &str, value: &str) {
        self.entries.insert(
            key.to_string(),
            (value.to_string(), Utc::now().to_rfc3339()),
        );
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|(value, _)| value.clone()))
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.insert(key, value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StorageResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }

    fn updated_at(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|(_, at)| at.clone()))
    }
}
