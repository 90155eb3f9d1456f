//! Static SQLite schema mapping for the climate dataset
//!
//! The measurement and station tables are mapped column by column instead of
//! being discovered at runtime. Loaders select exactly these columns, in this
//! order, so a schema mismatch fails at load time with a clear SQLite error.

/// Table names used by the climate dataset
#[derive(Debug, Clone)]
pub struct TableNames {
    pub measurement: &'static str,
    pub station: &'static str,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            measurement: "measurement",
            station: "station",
        }
    }
}

/// Column layout of the measurement table
pub mod measurement_columns {
    pub const STATION: &str = "station";
    pub const DATE: &str = "date";
    pub const PRECIPITATION: &str = "prcp";
    pub const TEMPERATURE_OBSERVATION: &str = "tobs";
}

/// Column layout of the station table
pub mod station_columns {
    pub const STATION: &str = "station";
    pub const NAME: &str = "name";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const ELEVATION: &str = "elevation";
}

/// SQL statements for the climate dataset tables
#[derive(Debug, Clone, Default)]
pub struct ClimateSchema {
    pub tables: TableNames,
}

impl ClimateSchema {
    /// Generate SQL selecting every measurement in storage order
    pub fn select_measurements_sql(&self) -> String {
        use measurement_columns::*;
        format!(
            "SELECT {}, {}, {}, {} FROM {} ORDER BY rowid",
            STATION, DATE, PRECIPITATION, TEMPERATURE_OBSERVATION, self.tables.measurement
        )
    }

    /// Generate SQL selecting every station in storage order
    pub fn select_stations_sql(&self) -> String {
        use station_columns::*;
        format!(
            "SELECT {}, {}, {}, {}, {} FROM {} ORDER BY rowid",
            STATION, NAME, LATITUDE, LONGITUDE, ELEVATION, self.tables.station
        )
    }

    /// Generate SQL for creating both tables
    ///
    /// Matches the layout of the published `hawaii.sqlite` dataset, including
    /// the integer surrogate `id` columns the loaders ignore.
    pub fn create_tables_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY,
                station TEXT NOT NULL,
                date TEXT NOT NULL,
                prcp FLOAT,
                tobs FLOAT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY,
                station TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                latitude FLOAT NOT NULL,
                longitude FLOAT NOT NULL,
                elevation FLOAT NOT NULL
            );",
            self.tables.measurement, self.tables.station
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_sql_uses_mapped_columns() {
        let schema = ClimateSchema::default();
        assert_eq!(
            schema.select_measurements_sql(),
            "SELECT station, date, prcp, tobs FROM measurement ORDER BY rowid"
        );
        assert!(schema
            .select_stations_sql()
            .starts_with("SELECT station, name, latitude, longitude, elevation FROM station"));
    }
}
