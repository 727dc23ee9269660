//! Paged-Harvest: an incremental listing-page harvester
//!
//! This crate walks a paginated listing site one page at a time, extracts a
//! record from every repeated item block, merges the records into a persisted
//! collection without duplicates, and follows the "next page" link until the
//! listing runs out.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod records;
pub mod state;
pub mod storage;

use thiserror::Error;

/// Main error type for Paged-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Document unavailable for {url}: {reason}")]
    DocumentUnavailable { url: String, reason: String },

    #[error("Invalid state transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CycleState,
        to: state::CycleState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// Per-block extraction failures
///
/// These never abort a page. The extractor records them as skipped blocks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Malformed number in {field}: '{raw}'")]
    MalformedNumber { field: &'static str, raw: String },

    #[error("Malformed color: '{0}'")]
    MalformedColor(String),
}

/// Result type alias for Paged-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for field extraction
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, Driver, NextPage, NextPageLocator, PageLink};
pub use records::{Keyed, PaletteRecord, ProjectRecord, ProjectType};
pub use state::CycleState;
pub use storage::{merge, BlobStore, MemoryBlobStore, RecordRepository, SqliteBlobStore};
