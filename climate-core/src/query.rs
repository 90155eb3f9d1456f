//! Query result types returned by the climate API
//!
//! Field names follow the public JSON contract of the `/api/v1.0` routes and
//! must not change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::{Measurement, Station};

/// One precipitation reading from the recent-year window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecipitationResult {
    pub date: NaiveDate,
    pub precipitation: Option<f64>,
}

impl From<&Measurement> for PrecipitationResult {
    fn from(measurement: &Measurement) -> Self {
        Self {
            date: measurement.date,
            precipitation: measurement.precipitation,
        }
    }
}

/// Station metadata as listed by the stations route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationResult {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

impl From<&Station> for StationResult {
    fn from(station: &Station) -> Self {
        Self {
            station: station.station.clone(),
            name: station.name.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            elevation: station.elevation,
        }
    }
}

/// A temperature observation joined with its station name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservationResult {
    /// Station display name
    pub station: String,
    pub date: NaiveDate,
    /// Observation truncated toward zero
    pub temperature: i64,
}

/// Temperature statistics over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStatsResult {
    #[serde(rename = "Start Date")]
    pub start_date: String,

    #[serde(rename = "End Date", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,

    #[serde(rename = "Minimum Temperature")]
    pub min_temp: Option<f64>,

    #[serde(rename = "Maximum Temperature")]
    pub max_temp: Option<f64>,

    #[serde(rename = "Average Temperature")]
    pub avg_temp: Option<f64>,
}
