//! Pattern-based extraction for feeds that no XML parser will accept.
//!
//! Titles and links are collected independently and paired by position,
//! so a channel-level `<title>`/`<link>` pair becomes the first entry just
//! like any item would.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::RawEntry;

pub const FALLBACK_MAX_ENTRIES: usize = 50;

static RE_TITLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<title[^>]*>\s*(?:<!\[CDATA\[(.*?)\]\]>|(.*?))\s*</title>")
        .expect("valid title regex")
});

static RE_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<link[^>]*>\s*(?:<!\[CDATA\[(.*?)\]\]>|(.*?))\s*</link>")
        .expect("valid link regex")
});

fn captured(re: &Regex, body: &str) -> Vec<String> {
    re.captures_iter(body)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Scan a raw document for `<title>`/`<link>` pairs, up to `limit` of them.
pub fn extract(body: &str, limit: usize) -> Vec<RawEntry> {
    let titles = captured(&RE_TITLE, body);
    let links = captured(&RE_LINK, body);

    titles
        .into_iter()
        .zip(links)
        .take(limit)
        .map(|(title, link)| RawEntry {
            title: Some(title),
            link: Some(link),
            ..Default::default()
        })
        .collect()
}
