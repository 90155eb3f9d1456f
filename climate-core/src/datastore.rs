//! Data store abstraction layer for the climate dataset
//!
//! The query service only ever reads. A store hands out complete snapshots of
//! the measurement and station tables; a single query works against one
//! snapshot and never observes a partially updated table.

pub mod csv_source;
pub mod sqlite_source;

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::error::ClimateResult;
use crate::records::{Measurement, Station};

pub use csv_source::CsvDataset;
pub use sqlite_source::SqliteDataset;

/// Read-only access to the measurement and station tables.
///
/// # Implementation Requirements
///
/// All implementations MUST:
/// - Return rows in a stable natural order
/// - Return a consistent snapshot for the duration of a call
/// - Be safe to call concurrently from many requests
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// List every measurement row
    async fn list_measurements(&self) -> ClimateResult<Arc<Vec<Measurement>>>;

    /// List every station row
    async fn list_stations(&self) -> ClimateResult<Arc<Vec<Station>>>;
}

/// Immutable in-memory snapshot of the dataset, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    measurements: Arc<Vec<Measurement>>,
    stations: Arc<Vec<Station>>,
}

impl InMemoryStore {
    /// Create a store from already loaded rows
    pub fn new(measurements: Vec<Measurement>, stations: Vec<Station>) -> Self {
        Self {
            measurements: Arc::new(measurements),
            stations: Arc::new(stations),
        }
    }

    /// Load the dataset from a SQLite database file
    pub fn from_sqlite<P: AsRef<Path>>(path: P) -> ClimateResult<Self> {
        let dataset = SqliteDataset::open(path.as_ref())?;
        let store = Self::new(dataset.load_measurements()?, dataset.load_stations()?);
        info!(
            "Loaded {} measurements and {} stations from {}",
            store.measurement_count(),
            store.station_count(),
            path.as_ref().display()
        );
        Ok(store)
    }

    /// Load the dataset from a directory holding `measurements.csv` and `stations.csv`
    pub fn from_csv_dir<P: AsRef<Path>>(dir: P) -> ClimateResult<Self> {
        let dataset = CsvDataset::new(dir.as_ref());
        let store = Self::new(dataset.load_measurements()?, dataset.load_stations()?);
        info!(
            "Loaded {} measurements and {} stations from {}",
            store.measurement_count(),
            store.station_count(),
            dir.as_ref().display()
        );
        Ok(store)
    }

    /// Number of measurement rows
    pub fn measurement_count(&self) -> usize {
        self.measurements.len()
    }

    /// Number of station rows
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }
}

#[async_trait]
impl DatasetStore for InMemoryStore {
    async fn list_measurements(&self) -> ClimateResult<Arc<Vec<Measurement>>> {
        Ok(Arc::clone(&self.measurements))
    }

    async fn list_stations(&self) -> ClimateResult<Arc<Vec<Station>>> {
        Ok(Arc::clone(&self.stations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_in_memory_store_returns_rows_in_order() {
        let day = NaiveDate::from_ymd_opt(2017, 8, 23).unwrap();
        let store = InMemoryStore::new(
            vec![
                Measurement::new("USC00519397", day, Some(0.0), 81.0),
                Measurement::new("USC00513117", day, None, 76.0),
            ],
            vec![Station::new("USC00519397", "WAIKIKI 717.2, HI US", 21.2716, -157.8168, 3.0)],
        );

        let measurements = store.list_measurements().await.unwrap();
        assert_eq!(measurements.len(), 2);
        assert_eq!(measurements[0].station, "USC00519397");
        assert_eq!(measurements[1].station, "USC00513117");

        let stations = store.list_stations().await.unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(store.station_count(), 1);
    }

    #[tokio::test]
    async fn test_snapshots_share_storage() {
        let store = InMemoryStore::default();
        let first = store.list_measurements().await.unwrap();
        let second = store.list_measurements().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(first.is_empty());
    }
}
