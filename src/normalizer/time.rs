use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

/// Best-effort timestamp parse into unix seconds. Unknown shapes yield 0.
///
/// Naive (zone-less) values are taken as UTC.
pub fn parse_timestamp(value: &str) -> i64 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.timestamp().max(0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return dt.timestamp().max(0);
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return dt.and_utc().timestamp().max(0);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return dt.and_utc().timestamp().max(0);
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rfc3339() {
        assert_eq!(parse_timestamp("2024-01-01T00:00:00Z"), 1_704_067_200);
        assert_eq!(parse_timestamp("2024-01-01T08:00:00+08:00"), 1_704_067_200);
    }

    #[test]
    fn test_rfc2822() {
        assert_eq!(parse_timestamp("Mon, 01 Jan 2024 00:00:00 GMT"), 1_704_067_200);
        assert_eq!(parse_timestamp("Mon, 01 Jan 2024 08:00:00 +0800"), 1_704_067_200);
    }

    #[test]
    fn test_naive_shapes() {
        assert_eq!(parse_timestamp("2024-01-01 00:00:00"), 1_704_067_200);
        assert_eq!(parse_timestamp("2024-01-01"), 1_704_067_200);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_timestamp(""), 0);
        assert_eq!(parse_timestamp("yesterday-ish"), 0);
    }
}
