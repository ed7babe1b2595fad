use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::app::Result;
use crate::domain::Item;
use crate::normalizer::time::parse_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// `data.json` read by the static reader page. Unset disables the export.
    pub data_file: Option<PathBuf>,
    pub max_items: usize,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            max_items: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub source: String,
    pub published_at: Option<String>,
}

impl From<&Item> for SiteItem {
    fn from(item: &Item) -> Self {
        let published_at = (item.published_ts > 0)
            .then(|| DateTime::from_timestamp(item.published_ts, 0))
            .flatten()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true));

        Self {
            title: item.title.clone(),
            link: item.link.clone(),
            summary: item.summary.clone(),
            source: item.source.clone(),
            published_at,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct SiteData {
    #[serde(default)]
    items: Vec<SiteItem>,
}

/// Rolling item list for the static reader page.
pub struct SiteExport {
    path: PathBuf,
    max_items: usize,
}

impl SiteExport {
    pub fn from_config(config: &SiteConfig) -> Option<Self> {
        config.data_file.as_ref().map(|path| Self::new(path, config.max_items))
    }

    pub fn new<P: AsRef<Path>>(path: P, max_items: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_items,
        }
    }

    fn load(&self) -> SiteData {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Merge new items in front of the existing list, drop repeated links,
    /// order newest first and cap. Returns the resulting item count.
    pub fn merge(&self, items: &[Item]) -> Result<usize> {
        let existing = self.load();

        let mut links = HashSet::new();
        let mut merged: Vec<SiteItem> = items
            .iter()
            .map(SiteItem::from)
            .chain(existing.items)
            .filter(|item| links.insert(item.link.clone()))
            .collect();

        merged.sort_by_key(|item| {
            std::cmp::Reverse(item.published_at.as_deref().map(parse_timestamp).unwrap_or(0))
        });
        merged.truncate(self.max_items);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let count = merged.len();
        fs::write(
            &self.path,
            serde_json::to_string_pretty(&SiteData { items: merged })?,
        )?;

        Ok(count)
    }
}
