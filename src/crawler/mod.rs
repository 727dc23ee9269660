//! Crawler module for walking a paginated listing
//!
//! This module contains the core crawling logic, including:
//! - The page host and settle timer abstractions, with HTTP/tokio implementations
//! - Next-page discovery
//! - The per-page driver state machine
//! - Overall crawl coordination

mod coordinator;
mod driver;
mod fetcher;
mod host;
mod paginator;

pub use coordinator::{run_crawl, Coordinator};
pub use driver::Driver;
pub use fetcher::{build_http_client, user_agent_string, HttpHost};
pub use host::{Host, Timer, TokioTimer};
pub use paginator::{
    locator_from_config, LinkTextLocator, NextPage, NextPageLocator, PageLink, SelectorLocator,
};
