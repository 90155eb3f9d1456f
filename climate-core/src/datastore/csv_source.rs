//! CSV dataset loader
//!
//! # CSV Formats
//!
//! - **measurements.csv** (has headers): `station,date,prcp,tobs`, where an
//!   empty `prcp` field means no precipitation was measured
//! - **stations.csv** (has headers): `station,name,latitude,longitude,elevation`

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ClimateError, ClimateResult};
use crate::records::{Measurement, Station};
use crate::time::parse_iso_date;

/// File name of the measurement table inside a CSV dataset directory
pub const MEASUREMENTS_FILE: &str = "measurements.csv";

/// File name of the station table inside a CSV dataset directory
pub const STATIONS_FILE: &str = "stations.csv";

#[derive(Debug, Deserialize)]
struct MeasurementRow {
    station: String,
    date: String,
    prcp: Option<f64>,
    tobs: f64,
}

#[derive(Debug, Deserialize)]
struct StationRow {
    station: String,
    name: String,
    latitude: f64,
    longitude: f64,
    elevation: f64,
}

/// A dataset stored as a directory of CSV files
#[derive(Debug, Clone)]
pub struct CsvDataset {
    dir: PathBuf,
}

impl CsvDataset {
    /// Create a loader for the given directory
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the measurement file
    pub fn measurements_path(&self) -> PathBuf {
        self.dir.join(MEASUREMENTS_FILE)
    }

    /// Path of the station file
    pub fn stations_path(&self) -> PathBuf {
        self.dir.join(STATIONS_FILE)
    }

    /// Read every measurement row
    pub fn load_measurements(&self) -> ClimateResult<Vec<Measurement>> {
        let path = self.measurements_path();
        let mut reader = open_reader(&path)?;

        let mut measurements = Vec::new();
        for (index, result) in reader.deserialize::<MeasurementRow>().enumerate() {
            let row = result?;
            let date = parse_iso_date(row.date.trim()).map_err(|_| {
                ClimateError::invalid_date(format!(
                    "{} (row {} of {})",
                    row.date,
                    index + 1,
                    path.display()
                ))
            })?;
            let measurement = Measurement::new(row.station.trim(), date, row.prcp, row.tobs);
            if let Some((column, value)) = measurement.non_finite_reading() {
                return Err(ClimateError::invalid_measurement(format!(
                    "{} is {} (row {} of {})",
                    column,
                    value,
                    index + 1,
                    path.display()
                )));
            }
            measurements.push(measurement);
        }

        debug!("Read {} measurements from {}", measurements.len(), path.display());
        Ok(measurements)
    }

    /// Read every station row
    pub fn load_stations(&self) -> ClimateResult<Vec<Station>> {
        let path = self.stations_path();
        let mut reader = open_reader(&path)?;

        let stations = reader
            .deserialize::<StationRow>()
            .map(|result| {
                result.map(|row| {
                    Station::new(
                        row.station.trim(),
                        row.name.trim(),
                        row.latitude,
                        row.longitude,
                        row.elevation,
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Read {} stations from {}", stations.len(), path.display());
        Ok(stations)
    }
}

fn open_reader(path: &Path) -> ClimateResult<csv::Reader<std::fs::File>> {
    let file = std::fs::File::open(path)?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file))
}
