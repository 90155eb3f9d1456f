//! SQLite dataset loader
//!
//! Reads the `measurement` and `station` tables of a database such as the
//! published `hawaii.sqlite` file. The database is opened read-only.

use rusqlite::{Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

use crate::error::{ClimateError, ClimateResult};
use crate::records::{Measurement, Station};
use crate::schema::ClimateSchema;
use crate::time::parse_iso_date;

/// A dataset stored in a SQLite database file
pub struct SqliteDataset {
    conn: Connection,
    schema: ClimateSchema,
}

impl SqliteDataset {
    /// Open an existing database file read-only
    pub fn open(path: &Path) -> ClimateResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self::from_connection(conn))
    }

    /// Wrap an already opened connection
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            schema: ClimateSchema::default(),
        }
    }

    /// Read every measurement row
    pub fn load_measurements(&self) -> ClimateResult<Vec<Measurement>> {
        let mut stmt = self.conn.prepare(&self.schema.select_measurements_sql())?;
        let raw_rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<f64>>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let measurements = raw_rows
            .into_iter()
            .map(|(station, date, prcp, tobs)| -> ClimateResult<Measurement> {
                let date = parse_iso_date(&date).map_err(|_| {
                    ClimateError::invalid_date(format!("{} (station {})", date, station))
                })?;
                let measurement = Measurement::new(station, date, prcp, tobs);
                if let Some((column, value)) = measurement.non_finite_reading() {
                    return Err(ClimateError::invalid_measurement(format!(
                        "{} is {} (station {} on {})",
                        column, value, measurement.station, measurement.date
                    )));
                }
                Ok(measurement)
            })
            .collect::<ClimateResult<Vec<_>>>()?;

        debug!("Read {} measurements from sqlite", measurements.len());
        Ok(measurements)
    }

    /// Read every station row
    pub fn load_stations(&self) -> ClimateResult<Vec<Station>> {
        let mut stmt = self.conn.prepare(&self.schema.select_stations_sql())?;
        let stations = stmt
            .query_map([], |row| {
                Ok(Station {
                    station: row.get(0)?,
                    name: row.get(1)?,
                    latitude: row.get(2)?,
                    longitude: row.get(3)?,
                    elevation: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Read {} stations from sqlite", stations.len());
        Ok(stations)
    }
}
