use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::app::Result;

/// A configured feed: an optional display name plus the feed URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedSource {
    pub display_name: Option<String>,
    pub url: String,
}

impl FeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            display_name: None,
            url: url.into(),
        }
    }

    pub fn named(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            url: url.into(),
        }
    }

    /// Name used in logs, failure counters and the `source` field of items.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.url)
    }

    /// Parse one line of a sources file.
    ///
    /// Accepted shapes: `https://host/feed`, `Name: https://host/feed` and
    /// `Name：https://host/feed` (full-width colon). Blank lines, `#`
    /// comments and lines without a valid http(s) URL yield `None`.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let start = line.find("https://").or_else(|| line.find("http://"))?;
        let url = line[start..].trim();
        Url::parse(url).ok()?;

        let name = line[..start]
            .trim()
            .trim_end_matches([':', '：'])
            .trim();

        if name.is_empty() {
            Some(Self::new(url))
        } else {
            Some(Self::named(name, url))
        }
    }

    /// Read and parse a sources file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Vec<Self>> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse_list(&content))
    }

    /// Parse a whole sources file, keeping file order.
    pub fn parse_list(content: &str) -> Vec<Self> {
        content
            .lines()
            .filter_map(|line| {
                let parsed = Self::parse_line(line);
                if parsed.is_none() {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() && !trimmed.starts_with('#') {
                        tracing::warn!(line = trimmed, "Skipping source line without a valid URL");
                    }
                }
                parsed
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_url() {
        let source = FeedSource::parse_line("https://example.com/feed.xml").unwrap();
        assert_eq!(source.display_name, None);
        assert_eq!(source.url, "https://example.com/feed.xml");
        assert_eq!(source.name(), "https://example.com/feed.xml");
    }

    #[test]
    fn test_named_ascii_colon() {
        let source = FeedSource::parse_line("Odaily: https://rss.odaily.news/rss/post").unwrap();
        assert_eq!(source.name(), "Odaily");
        assert_eq!(source.url, "https://rss.odaily.news/rss/post");
    }

    #[test]
    fn test_named_full_width_colon() {
        let source = FeedSource::parse_line("律动：https://api.theblockbeats.news/v2/rss/article").unwrap();
        assert_eq!(source.name(), "律动");
        assert_eq!(source.url, "https://api.theblockbeats.news/v2/rss/article");
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        assert!(FeedSource::parse_line("").is_none());
        assert!(FeedSource::parse_line("   ").is_none());
        assert!(FeedSource::parse_line("# https://example.com/feed").is_none());
        assert!(FeedSource::parse_line("not a url").is_none());
    }

    #[test]
    fn test_parse_list_keeps_order() {
        let content = "# feeds\nA: https://a.example/rss\n\nhttps://b.example/atom\ngarbage\n";
        let sources = FeedSource::parse_list(content);
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name(), "A");
        assert_eq!(sources[1].url, "https://b.example/atom");
    }
}
