use serde::Serialize;

/// A feed entry as it came off the wire, before normalization.
///
/// Every field is optional because feeds disagree on what they carry. The
/// parsing boundary (feed-rs or the tolerant fallback) fills what it can.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawEntry {
    pub guid: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    /// Raw publish (or last update) timestamp string.
    pub published: Option<String>,
    pub tags: Vec<String>,
}

impl RawEntry {
    /// Best available natural key: guid, then link, then title, then the
    /// whole entry serialized.
    pub fn natural_key(&self) -> String {
        [&self.guid, &self.link, &self.title]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| {
                serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_key_prefers_guid() {
        let entry = RawEntry {
            guid: Some("guid-1".into()),
            link: Some("https://example.com/a".into()),
            title: Some("A".into()),
            ..Default::default()
        };
        assert_eq!(entry.natural_key(), "guid-1");
    }

    #[test]
    fn test_natural_key_skips_blank_guid() {
        let entry = RawEntry {
            guid: Some("   ".into()),
            link: Some("https://example.com/a".into()),
            ..Default::default()
        };
        assert_eq!(entry.natural_key(), "https://example.com/a");
    }

    #[test]
    fn test_natural_key_falls_back_to_title() {
        let entry = RawEntry {
            title: Some(" Headline ".into()),
            ..Default::default()
        };
        assert_eq!(entry.natural_key(), "Headline");
    }

    #[test]
    fn test_natural_key_serializes_when_empty() {
        let entry = RawEntry {
            summary: Some("only a summary".into()),
            ..Default::default()
        };
        let key = entry.natural_key();
        assert!(key.contains("only a summary"));
        assert_eq!(key, entry.natural_key());
    }
}
