use crate::storage::traits::{BlobStore, StorageError, StorageResult};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

/// A blob store shared between the driver and the CLI handlers
pub type SharedStore = Arc<Mutex<dyn BlobStore + Send>>;

/// Wraps a store for sharing
pub fn shared<S: BlobStore + Send + 'static>(store: S) -> SharedStore {
    Arc::new(Mutex::new(store))
}

/// Loads and saves one record collection as a JSON array blob
pub struct RecordRepository<R> {
    store: SharedStore,
    key: String,
    _records: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordRepository<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            key: self.key.clone(),
            _records: PhantomData,
        }
    }
}

impl<R: Serialize + DeserializeOwned> RecordRepository<R> {
    pub fn new(store: SharedStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _records: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads the collection
    ///
    /// A missing key is an empty collection. A blob that does not parse is
    /// copied to `<key>.corrupt.<timestamp>` and the collection starts over
    /// empty; the next save overwrites the original key.
    pub fn load(&self) -> StorageResult<Vec<R>> {
        let mut store = self.lock()?;

        let Some(blob) = store.get(&self.key)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<R>>(&blob) {
            Ok(records) => Ok(records),
            Err(e) => {
                let backup_key = format!("{}.corrupt.{}", self.key, Utc::now().to_rfc3339());
                tracing::error!(
                    "Stored collection '{}' is corrupt ({}); backed up to '{}', starting empty",
                    self.key,
                    e,
                    backup_key
                );
                store.set(&backup_key, &blob)?;
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the stored collection with `records`
    pub fn save(&self, records: &[R]) -> StorageResult<()> {
        let blob =
            serde_json::to_string(records).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.lock()?.set(&self.key, &blob)
    }

    /// Removes the stored collection; returns whether it existed
    pub fn clear(&self) -> StorageResult<bool> {
        self.lock()?.delete(&self.key)
    }

    fn lock(&self) -> StorageResult<MutexGuard<'_, dyn BlobStore + Send + 'static>> {
        self.store
            .lock()
            .map_err(|e| StorageError::Poisoned(e.to_string()))
    }
}
