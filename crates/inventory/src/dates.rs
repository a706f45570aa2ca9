//! Calendar-date parsing and formatting.
//!
//! All arithmetic happens on [`NaiveDate`]: time-of-day components and
//! offsets are dropped at parse time, so day differences are exact.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD`, naive date-times and RFC 3339
/// timestamps. Timestamps keep the date as written in their own offset.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(date);
        }
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// `DD-MM-YYYY`, zero-padded.
pub fn format_day_month_year(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(parse_calendar_date("2024-01-10"), Some(d(2024, 1, 10)));
        assert_eq!(parse_calendar_date(" 2024-01-10 "), Some(d(2024, 1, 10)));
        assert_eq!(parse_calendar_date("2024/02/29"), Some(d(2024, 2, 29)));
    }

    #[test]
    fn timestamps_keep_their_written_date() {
        assert_eq!(parse_calendar_date("2024-01-10T23:30:00Z"), Some(d(2024, 1, 10)));
        assert_eq!(
            parse_calendar_date("2024-01-10T00:15:00-05:00"),
            Some(d(2024, 1, 10))
        );
        assert_eq!(parse_calendar_date("2024-01-10T08:00:00.250"), Some(d(2024, 1, 10)));
        assert_eq!(parse_calendar_date("2024-01-10 08:00:00"), Some(d(2024, 1, 10)));
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("tomorrow"), None);
        assert_eq!(parse_calendar_date("2023-02-29"), None);
        assert_eq!(parse_calendar_date("10-01-2024"), None);
    }

    #[test]
    fn formats_day_first() {
        assert_eq!(format_day_month_year(d(2024, 1, 5)), "05-01-2024");
        assert_eq!(format_day_month_year(d(987, 12, 31)), "31-12-0987");
    }
}
