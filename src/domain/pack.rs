use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Item;

/// One run's output batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack<T> {
    pub run_at_utc: String,
    /// Informational polling window.
    pub window_hours: u32,
    pub items: Vec<T>,
}

pub type MaterialPack = Pack<Item>;
pub type ResearchPack = Pack<ResearchRecord>;

impl<T> Pack<T> {
    pub fn new(run_at: DateTime<Utc>, window_hours: u32, items: Vec<T>) -> Self {
        Self {
            run_at_utc: run_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            window_hours,
            items,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Success,
    PartialContent,
}

/// An item enriched with full article text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub uuid: String,
    pub source: String,
    pub title: String,
    pub original_url: String,
    pub publish_ts: i64,
    pub content_markdown: String,
    pub tags: Vec<String>,
    pub status: ContentStatus,
}
