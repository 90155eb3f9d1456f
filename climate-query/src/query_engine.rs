use climate_core::{
    datastore::DatasetStore,
    error::ClimateResult,
    query::{
        PrecipitationResult, StationResult, TemperatureObservationResult, TemperatureStatsResult,
    },
    time::{format_iso_date, DateRange},
};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

use crate::aggregation;

/// Query engine translating route parameters into views over the dataset.
///
/// Holds nothing but the store handle, so it is cheap to share and every
/// operation is deterministic for a given dataset.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn DatasetStore>,
}

impl QueryEngine {
    /// Create a new query engine over the given store
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    /// Date and precipitation of every measurement in the recent-year window
    pub async fn precipitation_recent_year(&self) -> ClimateResult<Vec<PrecipitationResult>> {
        let measurements = self.store.list_measurements().await?;
        let results: Vec<PrecipitationResult> = aggregation::recent_year(&measurements)?
            .into_iter()
            .map(PrecipitationResult::from)
            .collect();

        debug!("Precipitation query returned {} rows", results.len());
        Ok(results)
    }

    /// All stations in storage order
    pub async fn list_stations(&self) -> ClimateResult<Vec<StationResult>> {
        let stations = self.store.list_stations().await?;
        Ok(stations.iter().map(StationResult::from).collect())
    }

    /// Temperature observations of the recent-year window, joined with station names
    pub async fn temperature_observations_recent_year(
        &self,
    ) -> ClimateResult<Vec<TemperatureObservationResult>> {
        let measurements = self.store.list_measurements().await?;
        let stations = self.store.list_stations().await?;

        let names: HashMap<&str, &str> = stations
            .iter()
            .map(|s| (s.station.as_str(), s.name.as_str()))
            .collect();

        let results: Vec<TemperatureObservationResult> = aggregation::recent_year(&measurements)?
            .into_iter()
            .filter_map(|m| {
                names
                    .get(m.station.as_str())
                    .map(|name| TemperatureObservationResult {
                        station: (*name).to_string(),
                        date: m.date,
                        temperature: m.temperature_observation as i64,
                    })
            })
            .collect();

        debug!("Temperature observation query returned {} rows", results.len());
        Ok(results)
    }

    /// Minimum, maximum and average temperature from `start` onward, bounded by `end` when given.
    ///
    /// Both dates must be `YYYY-MM-DD`; an end before the start is rejected.
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> ClimateResult<TemperatureStatsResult> {
        let range = DateRange::parse(start, end)?;
        let measurements = self.store.list_measurements().await?;
        let summary = aggregation::temperature_summary(&measurements, &range);

        debug!(
            "Temperature stats over {} summarized {} rows",
            range, summary.count
        );

        Ok(TemperatureStatsResult {
            start_date: format_iso_date(range.start),
            end_date: range.end.map(format_iso_date),
            min_temp: summary.min,
            max_temp: summary.max,
            avg_temp: summary.avg,
        })
    }

    /// Number of measurement and station rows currently visible
    pub async fn dataset_size(&self) -> ClimateResult<(usize, usize)> {
        let measurements = self.store.list_measurements().await?;
        let stations = self.store.list_stations().await?;
        Ok((measurements.len(), stations.len()))
    }
}
