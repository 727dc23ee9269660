//! One page cycle: settle, extract, merge, persist, paginate
//!
//! The driver is invoked once per loaded page. It reads the page after the
//! settle delay, appends new records to the stored collection, writes the
//! collection back, and then either requests the next page or reports that
//! the listing is exhausted. A page that cannot be read ends the invocation
//! before anything is written.

use crate::crawler::{Host, NextPage, NextPageLocator, Timer};
use crate::extract::Extractor;
use crate::output::{CycleOutcome, CycleReport};
use crate::state::CycleState;
use crate::storage::{merge, RecordRepository};
use crate::{HarvestError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Runs page cycles for one record variant
pub struct Driver<E: Extractor> {
    extractor: E,
    locator: Box<dyn NextPageLocator>,
    repository: RecordRepository<E::Record>,
    timer: Arc<dyn Timer>,
    settle_delay: Duration,
    state: CycleState,
}

impl<E: Extractor> Driver<E> {
    pub fn new(
        extractor: E,
        locator: Box<dyn NextPageLocator>,
        repository: RecordRepository<E::Record>,
        timer: Arc<dyn Timer>,
        settle_delay: Duration,
    ) -> Self {
        Self {
            extractor,
            locator,
            repository,
            timer,
            settle_delay,
            state: CycleState::Idle,
        }
    }

    /// State the last (or current) cycle reached
    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn repository(&self) -> &RecordRepository<E::Record> {
        &self.repository
    }

    fn transition(&mut self, next: CycleState) -> Result<()> {
        if !self.state.can_transition_to(next) {
            return Err(HarvestError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }
        tracing::trace!("Cycle state {} -> {}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Processes the host's current page
    ///
    /// On error the cycle stops where it failed. If the document could not
    /// be read, the stored collection is left untouched.
    pub async fn run_cycle<H: Host + ?Sized>(&mut self, host: &mut H) -> Result<CycleReport> {
        self.state = CycleState::Idle;

        self.transition(CycleState::Settling)?;
        self.timer.settle(self.settle_delay).await;

        self.transition(CycleState::Extracting)?;
        let (page_url, extracted, skipped, added, collection_size, next) = {
            let page = host.document().await?;

            let extraction = self.extractor.extract(&page);
            for skip in &extraction.skipped {
                tracing::warn!(
                    "Skipped block {} on {}: {}",
                    skip.index,
                    page.url(),
                    skip.reason
                );
            }
            let extracted = extraction.records.len();

            self.transition(CycleState::Merging)?;
            let existing = self.repository.load()?;
            let (collection, added) = merge(existing, extraction.records);

            self.transition(CycleState::Persisting)?;
            self.repository.save(&collection)?;

            self.transition(CycleState::Paginating)?;
            let next = self.locator.find_next(&page);

            (
                page.url().clone(),
                extracted,
                extraction.skipped.len(),
                added,
                collection.len(),
                next,
            )
        };

        let outcome = match next {
            NextPage::Next(link) => {
                host.follow(&link).await?;
                self.transition(CycleState::Navigated)?;
                CycleOutcome::Navigated {
                    next: link.url().clone(),
                }
            }
            NextPage::End => {
                self.transition(CycleState::Terminated)?;
                CycleOutcome::Terminated
            }
        };

        let report = CycleReport {
            page_url,
            extracted,
            skipped,
            added,
            collection_size,
            outcome,
        };

        tracing::info!(
            "{}: {} new of {} extracted, collection '{}' now {} records, {}",
            report.page_url,
            report.added,
            report.extracted,
            self.repository.key(),
            report.collection_size,
            report.outcome
        );

        Ok(report)
    }
}
