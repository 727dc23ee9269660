//! The environment a page cycle runs in
//!
//! The driver never loads pages or sleeps on its own. It asks a `Host` for
//! the current document, tells it where to go next, and waits out the settle
//! delay through a `Timer`. Swapping these out is how the driver is tested.

use crate::crawler::PageLink;
use crate::extract::Page;
use crate::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Supplies the current page and performs navigation
#[async_trait]
pub trait Host: Send {
    /// The page currently loaded
    ///
    /// Fails with `HarvestError::DocumentUnavailable` when there is no
    /// readable document.
    async fn document(&mut self) -> Result<Page>;

    /// Navigates to `link`; the next `document()` call reads the new page
    async fn follow(&mut self, link: &PageLink) -> Result<()>;
}

/// Single-shot delay before a page is read
#[async_trait]
pub trait Timer: Send + Sync {
    async fn settle(&self, delay: Duration);
}

/// Timer backed by `tokio::time::sleep`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioTimer;

#[async_trait]
impl Timer for TokioTimer {
    async fn settle(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}
