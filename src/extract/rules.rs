//! Field-level parsing rules
//!
//! Pure string functions used by the extractors. None of them touch the
//! document; they take the raw text an extractor pulled out of a block and
//! turn it into a typed field value.

use crate::records::ProjectType;
use crate::{ExtractError, ExtractResult};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn trailing_count_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\n0-9]+$").expect("static regex"))
}

fn comments_tail_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)(?:No\s+)?Comments.*$").expect("static regex"))
}

fn first_integer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("static regex"))
}

fn rgb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^rgba?\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*(?:,\s*[0-9.]+%?\s*)?\)$")
            .expect("static regex")
    })
}

/// Strips a `url("...")` wrapper from a background-image value
///
/// Exactly five leading and two trailing characters are removed. Values too
/// short to hold a wrapper yield an empty string.
pub fn strip_css_url(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= 7 {
        return String::new();
    }
    chars[5..chars.len() - 2].iter().collect()
}

/// Cleans a project subtitle
///
/// Some archive pages render the comment count straight after the subtitle
/// text, separated only by a newline. That trailing run of newlines and
/// digits is removed.
pub fn clean_subtitle(raw: &str) -> String {
    let trimmed = raw.trim();
    trailing_count_re()
        .replace(trimmed, "")
        .trim()
        .to_string()
}

/// Finds the first known project type label in `text`
///
/// Labels are checked in `ProjectType::SCAN_ORDER`; the first one found as a
/// substring wins, regardless of where it appears.
pub fn infer_project_type(text: &str) -> Option<ProjectType> {
    ProjectType::SCAN_ORDER
        .into_iter()
        .find(|kind| text.contains(kind.label()))
}

/// Splits a status line into its action token and date text
///
/// `"New 12 hours ago No Comments"` becomes `("New", "12 hours ago")`. The
/// line is cut where the comment link's text (`link_text`) starts; whatever
/// is left of a "Comments" / "No Comments" tail is cut as well. Without the
/// link text a numeric count ("3 Comments") cannot be told apart from the
/// date and stays in it.
pub fn split_status_line(line: &str, link_text: Option<&str>) -> (String, String) {
    let normalized = collapse_whitespace(line);

    let (action, rest) = match normalized.split_once(' ') {
        Some((action, rest)) => (action.to_string(), rest),
        None => (normalized.clone(), ""),
    };

    let link = link_text.map(collapse_whitespace).unwrap_or_default();
    let rest = match rest.rfind(link.as_str()) {
        Some(pos) if !link.is_empty() => &rest[..pos],
        _ => rest,
    };

    let date = comments_tail_re().replace(rest, "").trim().to_string();
    (action, date)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses the comment count from the status line's link text
///
/// A missing link, a link without digits ("No Comments"), or a number too
/// large to hold all count as zero comments.
pub fn parse_comment_count(link_text: Option<&str>) -> u32 {
    link_text
        .and_then(|text| first_integer_re().find(text))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// Parses a comma-grouped numeral such as `"12,345"`
///
/// Unlike comment counts there is no fallback: zero is a real value here, so
/// anything unparseable is an error.
pub fn parse_grouped_number(field: &'static str, raw: &str) -> ExtractResult<u64> {
    let digits: String = raw.trim().chars().filter(|c| *c != ',').collect();
    digits.parse().map_err(|_| ExtractError::MalformedNumber {
        field,
        raw: raw.to_string(),
    })
}

/// Converts an `rgb(r, g, b)` string to uppercase `#RRGGBB`
///
/// An empty input yields an empty string. Channels must be integers within
/// 0..=255; anything else is a malformed colour. An alpha component, if
/// present, is ignored.
pub fn rgb_to_hex(raw: &str) -> ExtractResult<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(String::new());
    }

    let caps = rgb_re()
        .captures(raw)
        .ok_or_else(|| ExtractError::MalformedColor(raw.to_string()))?;

    let mut channels = [0u8; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        *channel = caps[i + 1]
            .parse::<u8>()
            .map_err(|_| ExtractError::MalformedColor(raw.to_string()))?;
    }

    Ok(format!(
        "#{:02X}{:02X}{:02X}",
        channels[0], channels[1], channels[2]
    ))
}

/// Normalizes a swatch colour to uppercase `#RRGGBB`
///
/// Accepts the `rgb()` form as well as `#RRGGBB` / `#RGB` hex values, which
/// static markup may carry where a browser would report `rgb()`.
pub fn normalize_color(raw: &str) -> ExtractResult<String> {
    let raw = raw.trim();
    let Some(hex) = raw.strip_prefix('#') else {
        return rgb_to_hex(raw);
    };

    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ExtractError::MalformedColor(raw.to_string()));
    }

    match hex.len() {
        6 => Ok(format!("#{}", hex.to_ascii_uppercase())),
        3 => Ok(format!(
            "#{}",
            hex.chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase()
        )),
        _ => Err(ExtractError::MalformedColor(raw.to_string())),
    }
}

/// Removes repeated values, keeping the first occurrence of each
pub fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
