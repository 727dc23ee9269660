//! Read-only access to a loaded listing page
//!
//! This module handles the DOM side of extraction:
//! - Holding the parsed document together with the URL it was loaded from
//! - Scoped "first match" lookups inside an item block
//! - Reading trimmed text, attributes and inline style properties
//! - Resolving hrefs against the page URL

use crate::{ConfigError, ConfigResult};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// A loaded listing page
#[derive(Debug)]
pub struct Page {
    url: Url,
    html: Html,
}

impl Page {
    /// Parses an HTML body loaded from `url`
    pub fn parse(url: Url, body: &str) -> Self {
        Self {
            url,
            html: Html::parse_document(body),
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// All elements matching `selector`, in document order
    pub fn select_all<'a>(&'a self, selector: &'a Selector) -> Vec<ElementRef<'a>> {
        self.html.select(selector).collect()
    }

    /// Resolves an href found on this page to an absolute http(s) URL
    pub fn resolve(&self, href: &str) -> Option<Url> {
        resolve_href(href, &self.url)
    }
}

/// Compiles a CSS selector from configuration
pub fn compile(selector: &str) -> ConfigResult<Selector> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// First descendant of `scope` matching `selector`
pub fn select_first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Concatenated text content, trimmed at both ends
///
/// Inner whitespace (including newlines) is kept as-is.
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Looks up a property in the element's inline `style` attribute
///
/// Property names match case-insensitively. Returns `None` when there is no
/// style attribute or the property is not declared in it.
pub fn style_property(element: ElementRef<'_>, property: &str) -> Option<String> {
    let style = element.value().attr("style")?;

    split_declarations(style)
        .into_iter()
        .filter_map(|declaration| declaration.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim().to_string())
}

/// Splits a declaration list on `;` outside quotes and parentheses
///
/// `url("data:image/png;base64,...")` stays one value.
fn split_declarations(style: &str) -> Vec<&str> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in style.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                declarations.push(&style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    declarations.push(&style[start..]);

    declarations
}

/// How a field's value is read from its element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Read {
    /// Trimmed text content
    Text,
    /// An attribute value, verbatim
    Attr(&'static str),
    /// A property of the inline style
    Style(&'static str),
}

/// A compiled field lookup: which element, and what to read from it
#[derive(Debug, Clone)]
pub struct FieldRule {
    selector: Selector,
    read: Read,
}

impl FieldRule {
    pub fn new(selector: &str, read: Read) -> ConfigResult<Self> {
        Ok(Self {
            selector: compile(selector)?,
            read,
        })
    }
}

/// Reads a field from the first element in `block` matching the rule
///
/// A missing element or attribute is a gap, not an error. Callers decide what
/// a gap means for the field.
pub fn try_extract(block: ElementRef<'_>, rule: &FieldRule) -> Option<String> {
    let element = select_first(block, &rule.selector)?;

    match rule.read {
        Read::Text => Some(trimmed_text(element)),
        Read::Attr(name) => element.value().attr(name).map(str::to_string),
        Read::Style(property) => style_property(element, property),
    }
}

/// Resolves an href against a base URL
///
/// Returns None for links that cannot be navigated to:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel: and data: schemes
/// - anything that does not resolve to http(s)
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    base_url
        .join(href)
        .ok()
        .filter(|url| url.scheme() == "http" || url.scheme() == "https")
}
