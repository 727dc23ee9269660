//! Crawler coordinator - main crawl orchestration logic
//!
//! The coordinator plays the part of the page host's scheduler: every time
//! the driver navigates, it invokes the driver again on the new page. The
//! loop ends when a page has no next link, when `max-pages` cycles have run,
//! or when a cycle fails.

use crate::config::{Config, Site};
use crate::crawler::paginator::locator_from_config;
use crate::crawler::{Driver, Host, HttpHost, Timer, TokioTimer};
use crate::extract::{Extractor, PaletteExtractor, ProjectExtractor};
use crate::output::{CrawlEnd, CrawlSummary, CycleOutcome};
use crate::storage::{RecordRepository, SharedStore};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Main crawler coordinator structure
pub struct Coordinator<E: Extractor, H: Host> {
    driver: Driver<E>,
    host: H,
    max_pages: Option<u32>,
}

impl<E: Extractor, H: Host> Coordinator<E, H> {
    pub fn new(driver: Driver<E>, host: H, max_pages: Option<u32>) -> Self {
        Self {
            driver,
            host,
            max_pages,
        }
    }

    /// Builds a coordinator for `extractor` from the crawler configuration
    pub fn from_config(
        config: &Config,
        extractor: E,
        store: SharedStore,
        host: H,
        timer: Arc<dyn Timer>,
    ) -> Result<Self> {
        let locator = locator_from_config(&config.pagination_rule())?;
        let repository = RecordRepository::new(store, config.collection_key());
        let driver = Driver::new(
            extractor,
            locator,
            repository,
            timer,
            Duration::from_millis(config.crawler.settle_delay_ms),
        );
        Ok(Self::new(driver, host, config.crawler.max_pages))
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Runs cycles until the listing is exhausted, the page cap is hit, or a
    /// cycle fails
    ///
    /// A failed cycle is logged and recorded in the summary rather than
    /// returned as an error; pages already processed stay persisted.
    pub async fn run(&mut self) -> CrawlSummary {
        let mut summary = CrawlSummary::new(self.driver.repository().key());
        let start_time = std::time::Instant::now();

        loop {
            let report = match self.driver.run_cycle(&mut self.host).await {
                Ok(report) => report,
                Err(e) => {
                    let url = match &e {
                        crate::HarvestError::DocumentUnavailable { url, .. } => url.clone(),
                        _ => format!("page {}", summary.pages + 1),
                    };
                    tracing::error!("Cycle failed at {} ({}): {}", url, self.driver.state(), e);
                    summary.end = CrawlEnd::Failed {
                        url,
                        reason: e.to_string(),
                    };
                    break;
                }
            };

            summary.record(&report);

            if report.outcome == CycleOutcome::Terminated {
                tracing::info!("No next page after {}, crawl complete", report.page_url);
                summary.end = CrawlEnd::Exhausted;
                break;
            }

            if let Some(limit) = self.max_pages {
                if summary.pages >= limit {
                    tracing::info!("Reached max-pages ({}), stopping", limit);
                    summary.end = CrawlEnd::PageLimit(limit);
                    break;
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} pages, {} records added in {:?}",
            summary.pages,
            summary.added,
            start_time.elapsed()
        );

        summary
    }
}

/// Runs the main crawl operation for the configured site
///
/// Builds the extractor for `crawler.site`, an HTTP host at `start-url` and a
/// real timer, then drives the crawl to completion.
///
/// # Example
///
/// ```no_run
/// use paged_harvest::config::load_config;
/// use paged_harvest::crawler::run_crawl;
/// use paged_harvest::storage::open_storage;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let store = open_storage(Path::new(&config.output.database_path))?;
/// let summary = run_crawl(&config, store).await?;
/// println!("{} records added", summary.added);
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, store: SharedStore) -> Result<CrawlSummary> {
    let host = HttpHost::from_config(config)?;
    let timer: Arc<dyn Timer> = Arc::new(TokioTimer);

    tracing::info!(
        "Starting {} crawl at {} (collection '{}')",
        config.crawler.site,
        config.crawler.start_url,
        config.collection_key()
    );

    let summary = match config.crawler.site {
        Site::Projects => {
            let extractor = ProjectExtractor::new(&config.projects)?;
            Coordinator::from_config(config, extractor, store, host, timer)?
                .run()
                .await
        }
        Site::Palettes => {
            let extractor = PaletteExtractor::new(&config.palettes)?;
            Coordinator::from_config(config, extractor, store, host, timer)?
                .run()
                .await
        }
    };

    Ok(summary)
}
