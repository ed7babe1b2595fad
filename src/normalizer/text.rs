use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::Regex;

pub const SUMMARY_MAX_CHARS: usize = 200;

static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Remove markup, decode entities and trim.
pub fn strip_tags(s: &str) -> String {
    let without_tags = RE_TAGS.replace_all(s, "");
    decode_html_entities(&without_tags).trim().to_string()
}

/// Cap a string at `max` characters.
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_tags("  plain  "), "plain");
    }

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(strip_tags("Tom &amp; Jerry &lt;3"), "Tom & Jerry <3");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let s = "区块链".repeat(100);
        let out = truncate_chars(&s, SUMMARY_MAX_CHARS);
        assert_eq!(out.chars().count(), SUMMARY_MAX_CHARS);
        assert_eq!(truncate_chars("short", 200), "short");
    }
}
