//! HTTP host implementation
//!
//! This module loads listing pages over HTTP, including:
//! - Building HTTP clients with a proper user agent string
//! - GET requests for the current page
//! - Classifying failures into "document unavailable"

use crate::config::{Config, UserAgentConfig};
use crate::crawler::{Host, PageLink};
use crate::extract::Page;
use crate::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Formats the user agent: `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn user_agent_string(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use paged_harvest::config::UserAgentConfig;
/// use paged_harvest::crawler::build_http_client;
///
/// let config = UserAgentConfig {
///     crawler_name: "PagedHarvest".to_string(),
///     crawler_version: "1.0".to_string(),
///     contact_url: "https://example.com/about".to_string(),
///     contact_email: "admin@example.com".to_string(),
/// };
///
/// let client = build_http_client(&config).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent_string(config))
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Loads pages with GET requests
///
/// Navigation is lazy: `follow` only moves the cursor, and the request is
/// made when the driver asks for the document after settling.
pub struct HttpHost {
    client: Client,
    current: Url,
}

impl HttpHost {
    pub fn new(client: Client, start_url: Url) -> Self {
        Self {
            client,
            current: start_url,
        }
    }

    /// Builds a host positioned at the configured start URL
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = build_http_client(&config.user_agent)?;
        let start_url = Url::parse(&config.crawler.start_url)?;
        Ok(Self::new(client, start_url))
    }

    pub fn current_url(&self) -> &Url {
        &self.current
    }

    fn unavailable(&self, reason: impl Into<String>) -> HarvestError {
        HarvestError::DocumentUnavailable {
            url: self.current.to_string(),
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl Host for HttpHost {
    async fn document(&mut self) -> Result<Page> {
        tracing::debug!("GET {}", self.current);

        let response = match self.client.get(self.current.clone()).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(self.unavailable("Request timeout")),
            Err(e) if e.is_connect() => return Err(self.unavailable("Connection refused")),
            Err(e) => return Err(self.unavailable(e.to_string())),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(self.unavailable(format!("HTTP {}", status.as_u16())));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !content_type.contains("text/html") {
            return Err(self.unavailable(format!("Expected HTML, got {}", content_type)));
        }

        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| self.unavailable(e.to_string()))?;

        Ok(Page::parse(final_url, &body))
    }

    async fn follow(&mut self, link: &PageLink) -> Result<()> {
        tracing::debug!("Navigating to {}", link);
        self.current = link.url().clone();
        Ok(())
    }
}
