//! JSON export of a stored collection

use crate::storage::BlobStore;
use crate::Result;
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Envelope written by `--export`
#[derive(Debug, Clone, Serialize)]
pub struct ExportEnvelope {
    pub key: String,
    pub count: usize,
    pub exported_at: String,
    pub config_hash: String,
    pub records: Vec<Value>,
}

/// Builds the export envelope for `key`
///
/// A missing key exports an empty collection. A corrupt blob is an error;
/// exporting is read-only and never repairs the store.
pub fn build_export(store: &dyn BlobStore, key: &str, config_hash: &str) -> Result<ExportEnvelope> {
    let records: Vec<Value> = match store.get(key)? {
        Some(blob) => serde_json::from_str(&blob)?,
        None => Vec::new(),
    };

    Ok(ExportEnvelope {
        key: key.to_string(),
        count: records.len(),
        exported_at: Utc::now().to_rfc3339(),
        config_hash: config_hash.to_string(),
        records,
    })
}

/// Writes the collection under `key` to `path` as pretty JSON
///
/// Returns the number of records written.
pub fn export_collection(
    store: &dyn BlobStore,
    key: &str,
    config_hash: &str,
    path: &Path,
) -> Result<usize> {
    let envelope = build_export(store, key, config_hash)?;
    let json = serde_json::to_string_pretty(&envelope)?;
    std::fs::write(path, json)?;

    tracing::info!(
        "Exported {} records from '{}' to {}",
        envelope.count,
        key,
        path.display()
    );
    Ok(envelope.count)
}
