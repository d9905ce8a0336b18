//! Command-line date parsing.
//!
//! Bare dates widen to cover the whole UTC day: a start date becomes
//! `00:00:00Z` and an end date becomes `23:59:59Z`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Parses a window start: RFC 3339, or `YYYY-MM-DD` at the start of the day.
pub(crate) fn parse_start(value: &str) -> Result<DateTime<Utc>, String> {
    parse_bound(value, NaiveTime::MIN)
}

/// Parses a window end: RFC 3339, or `YYYY-MM-DD` at `23:59:59`.
pub(crate) fn parse_end(value: &str) -> Result<DateTime<Utc>, String> {
    let end_of_day = NaiveTime::from_hms_opt(23, 59, 59)
        .ok_or_else(|| "23:59:59 is not a valid time".to_string())?;
    parse_bound(value, end_of_day)
}

/// A calendar month given on the command line as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearMonth {
    pub year: i32,
    pub month: u32,
}

/// Parses `YYYY-MM`.
pub(crate) fn parse_month(value: &str) -> Result<YearMonth, String> {
    let invalid = || format!("invalid month {value:?}: expected YYYY-MM");
    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(YearMonth { year, month })
}

fn parse_bound(value: &str, time_of_day: NaiveTime) -> Result<DateTime<Utc>, String> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(time_of_day).and_utc())
        .map_err(|_| format!("invalid date {value:?}: expected YYYY-MM-DD or RFC 3339"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_start_date_is_midnight_utc() {
        let start = parse_start("2025-05-01").unwrap();
        assert_eq!(start.to_rfc3339(), "2025-05-01T00:00:00+00:00");
    }

    #[test]
    fn bare_end_date_is_last_second_of_day() {
        let end = parse_end("2025-05-31").unwrap();
        assert_eq!(end.to_rfc3339(), "2025-05-31T23:59:59+00:00");
    }

    #[test]
    fn rfc3339_is_converted_to_utc() {
        let start = parse_start("2025-05-01T02:00:00+02:00").unwrap();
        assert_eq!(start.to_rfc3339(), "2025-05-01T00:00:00+00:00");

        let end = parse_end("2025-05-31T12:30:00Z").unwrap();
        assert_eq!(end.to_rfc3339(), "2025-05-31T12:30:00+00:00");
    }

    #[test]
    fn garbage_dates_are_rejected() {
        assert!(parse_start("May 1st").is_err());
        assert!(parse_end("2025-13-01").is_err());
        assert!(parse_start("").is_err());
    }

    #[test]
    fn months_parse() {
        assert_eq!(
            parse_month("2025-05").unwrap(),
            YearMonth {
                year: 2025,
                month: 5
            }
        );
        assert_eq!(parse_month("2024-12").unwrap().month, 12);
    }

    #[test]
    fn bad_months_are_rejected() {
        assert!(parse_month("2025-13").is_err());
        assert!(parse_month("2025-00").is_err());
        assert!(parse_month("2025").is_err());
        assert!(parse_month("may-2025").is_err());
    }
}
