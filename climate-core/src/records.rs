//! Record types for the measurement and station tables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily observation taken at a station.
///
/// `station` holds the station code and refers to [`Station::station`]; the
/// association is many-to-one and is not enforced here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Station code
    pub station: String,
    /// Observation date
    pub date: NaiveDate,
    /// Precipitation, absent when nothing was measured that day
    pub precipitation: Option<f64>,
    /// Temperature observation in degrees
    pub temperature_observation: f64,
}

impl Measurement {
    /// Create a new measurement
    pub fn new<S: Into<String>>(
        station: S,
        date: NaiveDate,
        precipitation: Option<f64>,
        temperature_observation: f64,
    ) -> Self {
        Self {
            station: station.into(),
            date,
            precipitation,
            temperature_observation,
        }
    }

    /// First reading that is NaN or infinite, as `(column, value)`
    pub fn non_finite_reading(&self) -> Option<(&'static str, f64)> {
        if !self.temperature_observation.is_finite() {
            return Some(("tobs", self.temperature_observation));
        }
        match self.precipitation {
            Some(prcp) if !prcp.is_finite() => Some(("prcp", prcp)),
            _ => None,
        }
    }
}

/// Weather station metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station code, e.g. `USC00519397`
    pub station: String,
    /// Display name
    pub name: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Elevation in meters
    pub elevation: f64,
}

impl Station {
    /// Create a new station
    pub fn new<S: Into<String>, N: Into<String>>(
        station: S,
        name: N,
        latitude: f64,
        longitude: f64,
        elevation: f64,
    ) -> Self {
        Self {
            station: station.into(),
            name: name.into(),
            latitude,
            longitude,
            elevation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurement_serializes_iso_date() {
        let measurement = Measurement::new(
            "USC00519397",
            NaiveDate::from_ymd_opt(2017, 8, 23).unwrap(),
            None,
            81.0,
        );

        let json = serde_json::to_value(&measurement).unwrap();
        assert_eq!(json["date"], "2017-08-23");
        assert!(json["precipitation"].is_null());
    }

    #[test]
    fn test_non_finite_reading() {
        let day = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
        assert_eq!(
            Measurement::new("USC00519397", day, Some(0.1), 81.0).non_finite_reading(),
            None
        );

        let (column, value) = Measurement::new("USC00519397", day, None, f64::NAN)
            .non_finite_reading()
            .unwrap();
        assert_eq!(column, "tobs");
        assert!(value.is_nan());

        assert_eq!(
            Measurement::new("USC00519397", day, Some(f64::INFINITY), 81.0).non_finite_reading(),
            Some(("prcp", f64::INFINITY))
        );
    }
}
