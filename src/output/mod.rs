//! Output module for crawl reports and collection views
//!
//! This module handles:
//! - Per-cycle reports and the end-of-crawl summary
//! - Record counts per stored collection (`--stats`)
//! - Exporting a collection as JSON (`--export`)

mod export;
mod report;
pub mod stats;

pub use export::{build_export, export_collection, ExportEnvelope};
pub use report::{print_summary, CrawlEnd, CrawlSummary, CycleOutcome, CycleReport};
pub use stats::{load_statistics, print_statistics, CollectionStatistics};
