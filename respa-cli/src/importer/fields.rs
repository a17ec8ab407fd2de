//! Lenient coercion of spreadsheet cell values

use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::default_min_period;

/// Value of the "separate booking" column that requires manual confirmation
pub const CONFIRMATION_REQUIRED: &str = "Kyllä";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\s+").unwrap());

/// Replace newlines with spaces, collapse whitespace runs and trim
pub fn clean_text(text: &str) -> String {
    let text = text.replace('\n', " ");
    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Parse an integer cell, `None` when the cell is empty or malformed
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

/// Parse a number of hours written with either `.` or `,` as decimal
/// separator, truncated to whole minutes
///
/// Periods too long to count in microseconds with an `i64` are rejected.
pub fn parse_hours(value: &str) -> Option<Duration> {
    let hours: f64 = value.trim().replace(',', ".").parse().ok()?;
    let minutes = (hours * 60.0).trunc();
    if !minutes.is_finite() || minutes.abs() >= i64::MAX as f64 {
        return None;
    }

    Duration::try_minutes(minutes as i64).filter(|period| period.num_microseconds().is_some())
}

/// Minimum booking period, falling back to the default on malformed input
pub fn parse_min_period(value: &str) -> Duration {
    parse_hours(value).unwrap_or_else(default_min_period)
}

/// Maximum booking period, unset on malformed input
pub fn parse_max_period(value: &str) -> Option<Duration> {
    parse_hours(value)
}

/// Exact comparison against the "yes" value of the separate booking column
pub fn needs_confirmation(value: &str) -> bool {
    value == CONFIRMATION_REQUIRED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Studio\n  1 "), "Studio 1");
        assert_eq!(clean_text("Bändi-\nkämppä"), "Bändi- kämppä");
        assert_eq!(clean_text("a\tb"), "a\tb");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("12"), Some(12));
        assert_eq!(parse_int(" 40 "), Some(40));
        assert_eq!(parse_int("12,5"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("n. 10"), None);
    }

    #[test]
    fn test_parse_hours_comma_decimal() {
        assert_eq!(parse_hours("1,5"), Some(Duration::minutes(90)));
        assert_eq!(parse_hours("0.25"), Some(Duration::minutes(15)));
        assert_eq!(parse_hours("4"), Some(Duration::minutes(240)));
        assert_eq!(parse_hours("0,33"), Some(Duration::minutes(19)));
    }

    #[test]
    fn test_parse_hours_rejects_garbage() {
        assert_eq!(parse_hours(""), None);
        assert_eq!(parse_hours("2 h"), None);
        assert_eq!(parse_hours("inf"), None);
        assert_eq!(parse_hours("NaN"), None);
    }

    #[test]
    fn test_parse_hours_rejects_out_of_range() {
        assert_eq!(parse_hours("1e300"), None);
        assert_eq!(parse_hours("-1e300"), None);
        assert_eq!(parse_hours("3000000000"), None);
        assert_eq!(parse_hours("2000000000"), Some(Duration::minutes(120_000_000_000)));
        assert_eq!(parse_min_period("1e300"), Duration::minutes(30));
        assert_eq!(parse_max_period("3000000000"), None);
    }

    #[test]
    fn test_period_fallbacks() {
        assert_eq!(parse_min_period("ei rajaa"), Duration::minutes(30));
        assert_eq!(parse_min_period("2"), Duration::minutes(120));
        assert_eq!(parse_max_period("ei rajaa"), None);
    }

    #[test]
    fn test_needs_confirmation_is_exact() {
        assert!(needs_confirmation("Kyllä"));
        assert!(!needs_confirmation("kyllä"));
        assert!(!needs_confirmation("Ei"));
        assert!(!needs_confirmation(""));
    }
}
