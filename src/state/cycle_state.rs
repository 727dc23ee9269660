/// Cycle state definitions for one driver invocation
///
/// This module defines the states a single page cycle moves through, from
/// the moment the page is handed to the driver until it navigates away or
/// reports the end of the listing.
use std::fmt;

/// Represents the current state of a page cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleState {
    // ===== Active States =====
    /// Invocation created, nothing done yet
    Idle,

    /// Waiting out the settle delay before reading the page
    Settling,

    /// Reading item blocks into records
    Extracting,

    /// Merging new records into the loaded collection
    Merging,

    /// Writing the merged collection back to the store
    Persisting,

    /// Looking for the next-page link
    Paginating,

    // ===== Terminal States =====
    /// Next page requested; the host will invoke the driver again
    Navigated,

    /// No next page; the crawl is over
    Terminated,
}

impl CycleState {
    /// Returns true if the invocation is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Navigated | Self::Terminated)
    }

    /// Returns true if this state ends the whole crawl, not just the cycle
    pub fn ends_crawl(&self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Returns true if `next` directly follows this state
    pub fn can_transition_to(&self, next: CycleState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Settling)
                | (Self::Settling, Self::Extracting)
                | (Self::Extracting, Self::Merging)
                | (Self::Merging, Self::Persisting)
                | (Self::Persisting, Self::Paginating)
                | (Self::Paginating, Self::Navigated)
                | (Self::Paginating, Self::Terminated)
        )
    }

    /// Short lowercase name used in logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Settling => "settling",
            Self::Extracting => "extracting",
            Self::Merging => "merging",
            Self::Persisting => "persisting",
            Self::Paginating => "paginating",
            Self::Navigated => "navigated",
            Self::Terminated => "terminated",
        }
    }

    /// Returns all cycle states in order
    pub fn all_states() -> [Self; 8] {
        [
            Self::Idle,
            Self::Settling,
            Self::Extracting,
            Self::Merging,
            Self::Persisting,
            Self::Paginating,
            Self::Navigated,
            Self::Terminated,
        ]
    }
}

impl fmt::Display for CycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
