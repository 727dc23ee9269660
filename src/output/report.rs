//! Per-cycle reports and the crawl summary built from them

use std::fmt;
use url::Url;

/// How a cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Navigation to `next` was requested
    Navigated { next: Url },
    /// No next page was found
    Terminated,
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Navigated { next } => write!(f, "navigated to {}", next),
            Self::Terminated => f.write_str("terminated"),
        }
    }
}

/// What one driver invocation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub page_url: Url,
    /// Records extracted from the page
    pub extracted: usize,
    /// Blocks dropped by the extractor
    pub skipped: usize,
    /// Records appended to the collection
    pub added: usize,
    /// Collection size after persisting
    pub collection_size: usize,
    pub outcome: CycleOutcome,
}

/// Why the crawl loop stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEnd {
    /// The last page had no next-page link
    Exhausted,
    /// `max-pages` cycles ran
    PageLimit(u32),
    /// A cycle failed; nothing was written for that page
    Failed { url: String, reason: String },
}

/// Totals over a whole crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSummary {
    pub collection_key: String,
    pub pages: u32,
    pub extracted: usize,
    pub skipped: usize,
    pub added: usize,
    pub collection_size: usize,
    pub end: CrawlEnd,
}

impl CrawlSummary {
    pub fn new(collection_key: impl Into<String>) -> Self {
        Self {
            collection_key: collection_key.into(),
            pages: 0,
            extracted: 0,
            skipped: 0,
            added: 0,
            collection_size: 0,
            end: CrawlEnd::Exhausted,
        }
    }

    /// Folds one cycle into the totals
    pub fn record(&mut self, report: &CycleReport) {
        self.pages += 1;
        self.extracted += report.extracted;
        self.skipped += report.skipped;
        self.added += report.added;
        self.collection_size = report.collection_size;
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.end, CrawlEnd::Failed { .. })
    }
}

/// Prints the summary to stdout
pub fn print_summary(summary: &CrawlSummary) {
    println!("=== Crawl Summary ===\n");
    println!("Collection: {}", summary.collection_key);
    println!("  Pages processed: {}", summary.pages);
    println!("  Records extracted: {}", summary.extracted);
    println!("  Blocks skipped: {}", summary.skipped);
    println!("  Records added: {}", summary.added);
    println!("  Collection size: {}", summary.collection_size);
    println!();

    match &summary.end {
        CrawlEnd::Exhausted => println!("Stopped: no further pages"),
        CrawlEnd::PageLimit(limit) => println!("Stopped: max-pages ({}) reached", limit),
        CrawlEnd::Failed { url, reason } => println!("Stopped: {} failed ({})", url, reason),
    }
}
