//! Calendar date handling for climate queries

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClimateError, ClimateResult};

/// Date format used by the dataset and by every route parameter
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the "recent year" window, counted back from the latest measurement
pub const RECENT_YEAR_DAYS: i64 = 365;

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// chrono accepts unpadded fields such as `2017-1-5`; those are rejected here so
/// that a parsed date always formats back to the exact input.
pub fn parse_iso_date(input: &str) -> ClimateResult<NaiveDate> {
    let date = NaiveDate::parse_from_str(input, ISO_DATE_FORMAT)
        .map_err(|_| ClimateError::invalid_date(input))?;

    if date.format(ISO_DATE_FORMAT).to_string() != input {
        return Err(ClimateError::invalid_date(input));
    }

    Ok(date)
}

/// Format a date as `YYYY-MM-DD`
pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Inclusive lower bound of the recent-year window ending at `latest`.
///
/// `latest` comes from the dataset; an underflow is a data error.
pub fn recent_year_anchor(latest: NaiveDate) -> ClimateResult<NaiveDate> {
    latest
        .checked_sub_signed(Duration::days(RECENT_YEAR_DAYS))
        .ok_or_else(|| {
            ClimateError::data_access(format!(
                "recent-year window before {} is out of range",
                format_iso_date(latest)
            ))
        })
}

/// Inclusive date range with an optional upper bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Start date (inclusive)
    pub start: NaiveDate,
    /// End date (inclusive), unbounded when absent
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Range covering `start` and everything after it
    pub fn since(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Create a bounded range, rejecting an end before the start
    pub fn new(start: NaiveDate, end: NaiveDate) -> ClimateResult<Self> {
        if end < start {
            return Err(ClimateError::invalid_range(
                format_iso_date(start),
                format_iso_date(end),
            ));
        }

        Ok(Self {
            start,
            end: Some(end),
        })
    }

    /// Parse a range from raw path parameters
    pub fn parse(start: &str, end: Option<&str>) -> ClimateResult<Self> {
        let start = parse_iso_date(start)?;
        match end {
            Some(end) => Self::new(start, parse_iso_date(end)?),
            None => Ok(Self::since(start)),
        }
    }

    /// Check if a date falls within this range
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.map_or(true, |end| date <= end)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}..={}", format_iso_date(self.start), format_iso_date(end)),
            None => write!(f, "{}..", format_iso_date(self.start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2017-08-23").unwrap(), date(2017, 8, 23));
        assert_eq!(parse_iso_date("2016-02-29").unwrap(), date(2016, 2, 29));
    }

    #[test]
    fn test_parse_iso_date_rejects_malformed_input() {
        for input in [
            "2016/08/22",
            "not-a-date",
            "2017-1-5",
            "2017-02-30",
            "",
            "2017-08-23T00:00",
        ] {
            let err = parse_iso_date(input).unwrap_err();
            assert!(
                matches!(err, ClimateError::InvalidDate(ref s) if s == input),
                "expected InvalidDate for {:?}, got {:?}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_recent_year_anchor() {
        assert_eq!(recent_year_anchor(date(2017, 8, 23)).unwrap(), date(2016, 8, 23));
        // Leap day inside the window shifts the anchor by one
        assert_eq!(recent_year_anchor(date(2016, 8, 23)).unwrap(), date(2015, 8, 24));
    }

    #[test]
    fn test_recent_year_anchor_underflow_is_server_error() {
        let err = recent_year_anchor(NaiveDate::MIN).unwrap_err();
        assert!(matches!(err, ClimateError::DataAccess(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_date_range() {
        let range = DateRange::parse("2017-01-01", Some("2017-01-31")).unwrap();
        assert!(range.contains(date(2017, 1, 1)));
        assert!(range.contains(date(2017, 1, 31)));
        assert!(!range.contains(date(2016, 12, 31)));
        assert!(!range.contains(date(2017, 2, 1)));
        assert_eq!(range.to_string(), "2017-01-01..=2017-01-31");

        let open = DateRange::parse("2017-01-01", None).unwrap();
        assert!(open.contains(date(2030, 1, 1)));
        assert!(!open.contains(date(2016, 12, 31)));
    }

    #[test]
    fn test_date_range_single_day() {
        let range = DateRange::parse("2017-01-15", Some("2017-01-15")).unwrap();
        assert!(range.contains(date(2017, 1, 15)));
        assert!(!range.contains(date(2017, 1, 16)));
    }

    #[test]
    fn test_date_range_rejects_reversed_bounds() {
        let err = DateRange::parse("2017-02-01", Some("2017-01-01")).unwrap_err();
        assert!(matches!(err, ClimateError::InvalidRange { .. }));
    }

    #[test]
    fn test_date_range_reports_invalid_end_date() {
        let err = DateRange::parse("2017-01-01", Some("2017/01/31")).unwrap_err();
        assert!(matches!(err, ClimateError::InvalidDate(ref s) if s == "2017/01/31"));
    }
}
