//! Aggregation functions over measurement rows
//!
//! Everything here is a pure function of its input slice. The query engine
//! fetches a snapshot from the store and hands it to these helpers.

use chrono::NaiveDate;
use climate_core::{
    error::{ClimateError, ClimateResult},
    time::{recent_year_anchor, DateRange},
    Measurement,
};
use serde::Serialize;

/// Minimum, maximum and mean of a set of temperature observations.
///
/// All three are `None` when no observation qualified, which keeps
/// "no data" distinct from "data averaging zero".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureSummary {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
    pub count: usize,
}

impl TemperatureSummary {
    /// Summary of an empty set
    pub fn empty() -> Self {
        Self {
            min: None,
            max: None,
            avg: None,
            count: 0,
        }
    }
}

/// Latest measurement date in the dataset
pub fn latest_date(measurements: &[Measurement]) -> ClimateResult<NaiveDate> {
    measurements
        .iter()
        .map(|m| m.date)
        .max()
        .ok_or(ClimateError::EmptyDataset)
}

/// Inclusive lower bound of the recent-year window for this dataset
pub fn recent_year_start(measurements: &[Measurement]) -> ClimateResult<NaiveDate> {
    recent_year_anchor(latest_date(measurements)?)
}

/// Measurements dated on or after the recent-year anchor, in storage order
pub fn recent_year(measurements: &[Measurement]) -> ClimateResult<Vec<&Measurement>> {
    let anchor = recent_year_start(measurements)?;
    Ok(measurements.iter().filter(|m| m.date >= anchor).collect())
}

/// Summarize temperature observations of the measurements inside `range`
pub fn temperature_summary(measurements: &[Measurement], range: &DateRange) -> TemperatureSummary {
    summarize(
        measurements
            .iter()
            .filter(|m| range.contains(m.date))
            .map(|m| m.temperature_observation),
    )
}

/// Single-pass min/max/mean over a sequence of values
pub fn summarize<I>(values: I) -> TemperatureSummary
where
    I: IntoIterator<Item = f64>,
{
    let mut summary = TemperatureSummary::empty();
    let mut sum = 0.0f64;

    for value in values {
        summary.min = Some(summary.min.map_or(value, |min| min.min(value)));
        summary.max = Some(summary.max.map_or(value, |max| max.max(value)));
        sum += value;
        summary.count += 1;
    }

    // Rounding in `sum` can drift the mean just outside [min, max]
    if let (Some(min), Some(max)) = (summary.min, summary.max) {
        let mean = sum / summary.count as f64;
        summary.avg = Some(mean.max(min).min(max));
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn measurement(day: NaiveDate, tobs: f64) -> Measurement {
        Measurement::new("USC00519397", day, Some(0.0), tobs)
    }

    #[test]
    fn test_summarize() {
        let summary = summarize(vec![70.0, 80.0, 75.0, 63.0]);
        assert_eq!(summary.min, Some(63.0));
        assert_eq!(summary.max, Some(80.0));
        assert_eq!(summary.avg, Some(72.0));
        assert_eq!(summary.count, 4);
    }

    #[test]
    fn test_summarize_empty_is_all_none() {
        assert_eq!(summarize(Vec::new()), TemperatureSummary::empty());
    }

    #[test]
    fn test_summarize_distinguishes_zero_average() {
        let summary = summarize(vec![-5.0, 5.0]);
        assert_eq!(summary.avg, Some(0.0));
        assert_eq!(summary.min, Some(-5.0));
    }

    #[test]
    fn test_summarize_average_stays_within_bounds() {
        let summary = summarize(vec![76.9; 6]);
        assert_eq!(summary.min, Some(76.9));
        assert_eq!(summary.max, Some(76.9));
        assert_eq!(summary.avg, Some(76.9));

        let summary = summarize(vec![0.1, 0.1, 0.1]);
        assert_eq!(summary.avg, Some(0.1));

        let summary = summarize(vec![76.9, 77.1, 76.9, 77.3, 76.7]);
        let (min, max, avg) = (
            summary.min.unwrap(),
            summary.max.unwrap(),
            summary.avg.unwrap(),
        );
        assert!(min <= avg && avg <= max);
    }

    #[test]
    fn test_latest_date_on_empty_dataset() {
        assert!(matches!(latest_date(&[]), Err(ClimateError::EmptyDataset)));
        assert!(matches!(recent_year(&[]), Err(ClimateError::EmptyDataset)));
    }

    #[test]
    fn test_recent_year_window_is_inclusive() {
        let rows = vec![
            measurement(date(2016, 8, 22), 70.0),
            measurement(date(2016, 8, 23), 71.0),
            measurement(date(2017, 1, 1), 65.0),
            measurement(date(2017, 8, 23), 80.0),
        ];

        let recent = recent_year(&rows).unwrap();
        let dates: Vec<NaiveDate> = recent.iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![date(2016, 8, 23), date(2017, 1, 1), date(2017, 8, 23)]);
    }

    #[test]
    fn test_recent_year_keeps_storage_order_and_duplicates() {
        let rows = vec![
            measurement(date(2017, 8, 23), 80.0),
            measurement(date(2017, 8, 1), 78.0),
            measurement(date(2017, 8, 23), 79.0),
        ];

        let recent = recent_year(&rows).unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].temperature_observation, 80.0);
        assert_eq!(recent[2].temperature_observation, 79.0);
    }

    #[test]
    fn test_temperature_summary_respects_range() {
        let rows = vec![
            measurement(date(2016, 12, 31), 10.0),
            measurement(date(2017, 1, 1), 60.0),
            measurement(date(2017, 1, 15), 70.0),
            measurement(date(2017, 1, 31), 65.0),
            measurement(date(2017, 2, 1), 99.0),
        ];

        let range = DateRange::new(date(2017, 1, 1), date(2017, 1, 31)).unwrap();
        let summary = temperature_summary(&rows, &range);
        assert_eq!(summary.min, Some(60.0));
        assert_eq!(summary.max, Some(70.0));
        assert_eq!(summary.avg, Some(65.0));
        assert_eq!(summary.count, 3);

        let since = temperature_summary(&rows, &DateRange::since(date(2017, 1, 31)));
        assert_eq!(since.count, 2);
        assert_eq!(since.max, Some(99.0));
    }
}
