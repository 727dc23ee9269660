//! Record extraction from listing pages
//!
//! An extractor walks every item block on a page in document order and turns
//! each one into a record. Field lookups are tolerant: a missing sub-element
//! becomes an empty or default value. Only failures that would make a record
//! wrong (an unparseable favourites count, an impossible colour) drop the
//! block, and those are reported back as skips rather than errors.

pub mod document;
pub mod rules;

mod palette;
mod project;

pub use document::{try_extract, FieldRule, Page, Read};
pub use palette::PaletteExtractor;
pub use project::{ProjectExtractor, ProjectTypePolicy};

use crate::records::Keyed;
use crate::ExtractError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A block that produced no record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSkip {
    /// Zero-based position among the page's item blocks
    pub index: usize,
    pub reason: ExtractError,
}

/// Result of extracting one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction<R> {
    /// Records in document order
    pub records: Vec<R>,
    pub skipped: Vec<BlockSkip>,
}

impl<R> Default for Extraction<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Turns a loaded page into records of one variant
pub trait Extractor {
    type Record: Keyed + Serialize + DeserializeOwned + Clone + Debug;

    fn extract(&self, page: &Page) -> Extraction<Self::Record>;
}
