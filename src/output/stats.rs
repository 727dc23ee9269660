//! Statistics over the stored collections
//!
//! This module provides the `--stats` view: one line per blob-store key with
//! its record count and last write time.

use crate::storage::{BlobStore, StorageResult};

/// One stored collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionStat {
    pub key: String,

    /// Number of records, or `None` if the blob is not a JSON array
    pub records: Option<usize>,

    pub updated_at: Option<String>,
}

/// Statistics for every key in the store
#[derive(Debug, Clone, Default)]
pub struct CollectionStatistics {
    pub collections: Vec<CollectionStat>,
}

impl CollectionStatistics {
    /// Total records across all readable collections
    pub fn total_records(&self) -> usize {
        self.collections.iter().filter_map(|c| c.records).sum()
    }
}

/// Loads statistics from storage
pub fn load_statistics(store: &dyn BlobStore) -> StorageResult<CollectionStatistics> {
    let mut collections = Vec::new();

    for key in store.keys()? {
        let records = store
            .get(&key)?
            .and_then(|blob| serde_json::from_str::<Vec<serde_json::Value>>(&blob).ok())
            .map(|records| records.len());

        collections.push(CollectionStat {
            updated_at: store.updated_at(&key)?,
            key,
            records,
        });
    }

    Ok(CollectionStatistics { collections })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CollectionStatistics) {
    println!("=== Collection Statistics ===\n");

    if stats.collections.is_empty() {
        println!("No collections stored yet.");
        return;
    }

    for collection in &stats.collections {
        let records = match collection.records {
            Some(count) => count.to_string(),
            None => "unreadable".to_string(),
        };
        println!(
            "  {}: {} records (updated {})",
            collection.key,
            records,
            collection.updated_at.as_deref().unwrap_or("never")
        );
    }
    println!();
    println!("Total records: {}", stats.total_records());
}
