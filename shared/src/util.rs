/// Current UTC timestamp in milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Parse a caller-supplied date into UTC milliseconds.
///
/// Accepts RFC 3339 (`2025-06-01T09:00:00Z`) or a bare date (`2025-06-01`,
/// interpreted as midnight UTC). Returns `None` when the input parses as
/// neither.
pub fn parse_date_millis(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.timestamp_millis());
    }
    chrono::NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rfc3339() {
        let ms = parse_date_millis("2025-06-01T09:30:00Z").unwrap();
        assert_eq!(ms, 1_748_770_200_000);
    }

    #[test]
    fn parses_bare_date_as_midnight_utc() {
        let ms = parse_date_millis("2025-06-01").unwrap();
        assert_eq!(ms, 1_748_736_000_000);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_date_millis("not-a-date").is_none());
        assert!(parse_date_millis("").is_none());
        assert!(parse_date_millis("2025-13-40").is_none());
    }
}
