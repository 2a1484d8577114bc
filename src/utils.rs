//! Utility functions for date windows and log-friendly strings.

use chrono::{NaiveDate, TimeDelta, Utc};

/// First day of a recency window ending today (UTC).
///
/// `since_date(30)` on 2025-04-09 is 2025-03-10.
pub fn since_date(days: i64) -> NaiveDate {
    since_date_from(Utc::now().date_naive(), days)
}

fn since_date_from(today: NaiveDate, days: i64) -> NaiveDate {
    today - TimeDelta::days(days)
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes (backing off to a character
/// boundary) with an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // "é" is two bytes; cutting at 3 would split the second one.
        let result = truncate_for_log("éé", 3);
        assert_eq!(result, "é…(+2 bytes)");
    }

    #[test]
    fn test_since_date_thirty_days() {
        let today = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();
        assert_eq!(
            since_date_from(today, 30),
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
        );
    }

    #[test]
    fn test_since_date_crosses_year() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(
            since_date_from(today, 30),
            NaiveDate::from_ymd_opt(2024, 12, 16).unwrap()
        );
    }
}
