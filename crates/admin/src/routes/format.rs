//! Display formatting for backend values.

use chrono::{DateTime, NaiveDate, Utc};

/// "19 Oct 2026", or "-" when unknown.
#[must_use]
pub fn date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%-d %b %Y").to_string())
}

/// "19 Oct", the compact form used in recent-activity lists.
#[must_use]
pub fn day_month(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%d %b").to_string())
}

/// "19 Oct 2026, 14:05".
#[must_use]
pub fn date_time(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |d| d.format("%-d %b %Y, %H:%M").to_string(),
    )
}

/// A `YYYY-MM-DD` trend key as "05 Mar"; anything else is shown as is.
#[must_use]
pub fn trend_day(key: &str) -> String {
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .map_or_else(|_| key.to_string(), |d| d.format("%d %b").to_string())
}

/// The value, or "-" for a missing or blank one.
#[must_use]
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_dates() {
        let d = Utc.with_ymd_and_hms(2026, 3, 5, 14, 5, 0).unwrap();
        assert_eq!(date(Some(d)), "5 Mar 2026");
        assert_eq!(day_month(Some(d)), "05 Mar");
        assert_eq!(date_time(Some(d)), "5 Mar 2026, 14:05");
        assert_eq!(date(None), "-");
    }

    #[test]
    fn test_trend_day() {
        assert_eq!(trend_day("2026-03-05"), "05 Mar");
        assert_eq!(trend_day("week 10"), "week 10");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some(" Pune ")), "Pune");
        assert_eq!(or_dash(Some("")), "-");
        assert_eq!(or_dash(None), "-");
    }
}
