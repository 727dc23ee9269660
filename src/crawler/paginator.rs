//! Next-page discovery
//!
//! A listing page either carries a link to the next page or it is the last
//! one. Locators never guess: an absent control, or one without a usable
//! href, ends the crawl.

use crate::config::PaginationConfig;
use crate::extract::document::{self, Page};
use crate::ConfigResult;
use scraper::{ElementRef, Selector};
use std::fmt;
use url::Url;

/// Navigation handle for the next listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    url: Url,
}

impl PageLink {
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for PageLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Outcome of looking for the next page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    Next(PageLink),
    End,
}

/// Finds the next-page control on a loaded page
pub trait NextPageLocator: Send + Sync {
    fn find_next(&self, page: &Page) -> NextPage;

    /// Human-readable rule, for logs and `--dry-run`
    fn describe(&self) -> String;
}

/// Builds the locator for a pagination rule
pub fn locator_from_config(rule: &PaginationConfig) -> ConfigResult<Box<dyn NextPageLocator>> {
    let locator: Box<dyn NextPageLocator> = match rule {
        PaginationConfig::Selector { selector } => Box::new(SelectorLocator::new(selector)?),
        PaginationConfig::LinkText { label } => Box::new(LinkTextLocator::new(label)?),
    };
    Ok(locator)
}

/// Turns the matched control into a link, or `End` if it has no usable href
fn link_from(page: &Page, control: ElementRef<'_>) -> NextPage {
    let Some(href) = control.value().attr("href") else {
        tracing::warn!(
            "Next-page control on {} has no href; treating as last page",
            page.url()
        );
        return NextPage::End;
    };

    match page.resolve(href) {
        Some(url) => NextPage::Next(PageLink::new(url)),
        None => {
            tracing::warn!(
                "Next-page href '{}' on {} is not navigable; treating as last page",
                href,
                page.url()
            );
            NextPage::End
        }
    }
}

/// First element matching a CSS selector
#[derive(Debug, Clone)]
pub struct SelectorLocator {
    raw: String,
    selector: Selector,
}

impl SelectorLocator {
    pub fn new(selector: &str) -> ConfigResult<Self> {
        Ok(Self {
            raw: selector.to_string(),
            selector: document::compile(selector)?,
        })
    }
}

impl NextPageLocator for SelectorLocator {
    fn find_next(&self, page: &Page) -> NextPage {
        match page.html().select(&self.selector).next() {
            Some(control) => link_from(page, control),
            None => NextPage::End,
        }
    }

    fn describe(&self) -> String {
        format!("selector `{}`", self.raw)
    }
}

/// First link whose trimmed text equals a label exactly
#[derive(Debug, Clone)]
pub struct LinkTextLocator {
    label: String,
    links: Selector,
}

impl LinkTextLocator {
    pub fn new(label: &str) -> ConfigResult<Self> {
        Ok(Self {
            label: label.trim().to_string(),
            links: document::compile("a")?,
        })
    }
}

impl NextPageLocator for LinkTextLocator {
    fn find_next(&self, page: &Page) -> NextPage {
        page.html()
            .select(&self.links)
            .find(|link| document::trimmed_text(*link) == self.label)
            .map_or(NextPage::End, |control| link_from(page, control))
    }

    fn describe(&self) -> String {
        format!("link text \"{}\"", self.label)
    }
}
