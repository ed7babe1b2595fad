pub mod text;
pub mod time;
pub mod tolerant;

use chrono::SecondsFormat;
use feed_rs::parser;

use crate::app::{FeedpackError, Result};
use crate::domain::{FeedSource, Item, RawEntry, SeenState};

use self::text::{strip_tags, truncate_chars, SUMMARY_MAX_CHARS};
use self::time::parse_timestamp;

pub const DEFAULT_ENTRIES_PER_SOURCE: usize = 200;
pub const DEFAULT_MAX_ITEMS: usize = 200;

/// Entries parsed from one source, in feed order.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub source: FeedSource,
    pub entries: Vec<RawEntry>,
}

/// How a feed body was turned into entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Structured,
    /// The document was malformed; entries came from the tolerant scan.
    Tolerant,
}

#[derive(Clone)]
pub struct Normalizer {
    entries_per_source: usize,
    fallback_max: usize,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            entries_per_source: DEFAULT_ENTRIES_PER_SOURCE,
            fallback_max: tolerant::FALLBACK_MAX_ENTRIES,
        }
    }

    pub fn with_entries_per_source(mut self, limit: usize) -> Self {
        self.entries_per_source = limit;
        self
    }

    /// Parse a feed document into raw entries. Only ids present in the
    /// document become `guid`; entries without one are keyed by link.
    pub fn parse(&self, body: &[u8]) -> Result<Vec<RawEntry>> {
        let feed = parser::Builder::new()
            .id_generator(|_, _, _| String::new())
            .build()
            .parse(body)
            .map_err(|e| FeedpackError::FeedParse(e.to_string()))?;

        let entries = feed
            .entries
            .into_iter()
            .take(self.entries_per_source)
            .map(|entry| {
                let published = entry
                    .published
                    .or(entry.updated)
                    .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true));

                RawEntry {
                    guid: Some(entry.id).filter(|id| !id.trim().is_empty()),
                    title: entry.title.map(|t| t.content),
                    link: entry.links.first().map(|l| l.href.clone()),
                    summary: entry
                        .summary
                        .map(|s| s.content)
                        .or_else(|| entry.content.and_then(|c| c.body)),
                    published,
                    tags: entry
                        .categories
                        .into_iter()
                        .map(|c| c.term)
                        .filter(|t| !t.trim().is_empty())
                        .collect(),
                }
            })
            .collect();

        Ok(entries)
    }

    /// Parse, falling back to the tolerant scan when the document is
    /// malformed. The scan is capped by the smaller of the fallback and
    /// per-source limits.
    pub fn parse_tolerant(&self, body: &[u8]) -> (ParseMode, Vec<RawEntry>) {
        match self.parse(body) {
            Ok(entries) => (ParseMode::Structured, entries),
            Err(e) => {
                tracing::debug!(error = %e, "Malformed feed, trying tolerant scan");
                let text = String::from_utf8_lossy(body);
                let limit = self.fallback_max.min(self.entries_per_source);
                (ParseMode::Tolerant, tolerant::extract(&text, limit))
            }
        }
    }

    /// Turn a raw entry into an item, or drop it when title or link is missing.
    pub fn normalize(&self, source: &FeedSource, entry: &RawEntry) -> Option<Item> {
        let title = entry.title.as_deref().map(strip_tags).unwrap_or_default();
        let link = entry.link.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() || link.is_empty() {
            return None;
        }

        let summary = entry
            .summary
            .as_deref()
            .map(strip_tags)
            .map(|s| truncate_chars(&s, SUMMARY_MAX_CHARS))
            .unwrap_or_default();

        Some(Item {
            id: Item::generate_id(&entry.natural_key()),
            source: source.name().to_string(),
            title,
            link: link.to_string(),
            summary,
            published_ts: entry.published.as_deref().map(parse_timestamp).unwrap_or(0),
            tags: entry.tags.clone(),
        })
    }

    /// Normalize every batch, skip ids already in `state`, mark accepted ids
    /// seen and stop after `max_items` new items. Result is newest first;
    /// undated items sort last and ties keep feed order.
    pub fn collect_new(
        &self,
        batches: &[SourceBatch],
        state: &mut SeenState,
        max_items: usize,
    ) -> Vec<Item> {
        let mut items = Vec::new();

        'sources: for batch in batches {
            for entry in &batch.entries {
                if items.len() >= max_items {
                    break 'sources;
                }
                let Some(item) = self.normalize(&batch.source, entry) else {
                    continue;
                };
                if !state.insert(item.id.clone()) {
                    continue;
                }
                items.push(item);
            }
        }

        items.sort_by(|a, b| b.published_ts.cmp(&a.published_ts));
        items
    }
}
