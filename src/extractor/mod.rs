//! Full-text enrichment for new items.
//!
//! ```text
//! Item (with link) → ContentExtractor → markdown → ResearchRecord
//! ```
//!
//! Extraction is best effort: on any failure the feed summary stands in
//! and the record is marked `partial_content`.

mod reader_proxy;

pub use reader_proxy::{ReaderProxyConfig, ReaderProxyExtractor};

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{ContentStatus, Item, ResearchRecord};

/// Fetches the readable body of an article.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<String>;
}

/// Build a research record from an item and the extraction outcome.
pub fn enrich(item: Item, extracted: Result<String>) -> ResearchRecord {
    let (content_markdown, status) = match extracted {
        Ok(body) => (body, ContentStatus::Success),
        Err(e) => {
            tracing::warn!(url = %item.link, error = %e, "Extraction failed, using feed summary");
            (item.summary.clone(), ContentStatus::PartialContent)
        }
    };

    ResearchRecord {
        uuid: item.id,
        source: item.source,
        title: item.title,
        original_url: item.link,
        publish_ts: item.published_ts,
        content_markdown,
        tags: item.tags,
        status,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::app::FeedpackError;

    pub(crate) struct FixedExtractor(pub Option<&'static str>);

    #[async_trait]
    impl ContentExtractor for FixedExtractor {
        async fn extract(&self, _url: &str) -> Result<String> {
            self.0
                .map(String::from)
                .ok_or(FeedpackError::Upstream {
                    status: 502,
                    body: "bad gateway".into(),
                })
        }
    }

    fn item() -> Item {
        Item {
            id: Item::generate_id("https://example.com/a"),
            source: "Test".into(),
            title: "Title".into(),
            link: "https://example.com/a".into(),
            summary: "Hello world".into(),
            published_ts: 42,
            tags: vec!["t".into()],
        }
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_summary() {
        let extractor = FixedExtractor(None);
        let item = item();
        let outcome = extractor.extract(&item.link).await;
        let record = enrich(item, outcome);

        assert_eq!(record.status, ContentStatus::PartialContent);
        assert_eq!(record.content_markdown, "Hello world");
    }

    #[tokio::test]
    async fn test_success_uses_markdown() {
        let extractor = FixedExtractor(Some("# Full text"));
        let item = item();
        let outcome = extractor.extract(&item.link).await;
        let record = enrich(item, outcome);

        assert_eq!(record.status, ContentStatus::Success);
        assert_eq!(record.content_markdown, "# Full text");
        assert_eq!(record.original_url, "https://example.com/a");
        assert_eq!(record.publish_ts, 42);
        assert_eq!(record.tags, vec!["t".to_string()]);
    }
}
