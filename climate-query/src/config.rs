use anyhow::Result;
use climate_core::{ClimateError, InMemoryStore};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Configuration for the query service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Address to bind the HTTP server to
    pub bind_address: String,

    /// Dataset source configuration
    pub dataset: DatasetConfig,

    /// Metrics and monitoring configuration
    pub metrics: MetricsConfig,
}

/// On-disk format of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetFormat {
    /// SQLite database with `measurement` and `station` tables
    Sqlite,
    /// Directory holding `measurements.csv` and `stations.csv`
    Csv,
}

impl FromStr for DatasetFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(DatasetFormat::Sqlite),
            "csv" => Ok(DatasetFormat::Csv),
            other => Err(anyhow::anyhow!(
                "Unknown dataset format '{}', expected 'sqlite' or 'csv'",
                other
            )),
        }
    }
}

/// Dataset source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// SQLite file or CSV directory
    pub path: PathBuf,

    /// Format of `path`
    pub format: DatasetFormat,
}

/// Metrics and monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable Prometheus metrics endpoint
    pub enable_prometheus: bool,

    /// Slow query threshold in milliseconds
    pub slow_query_threshold_ms: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            dataset: DatasetConfig::default(),
            metrics: MetricsConfig::default(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("hawaii.sqlite"),
            format: DatasetFormat::Sqlite,
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enable_prometheus: true,
            slow_query_threshold_ms: 500,
        }
    }
}

impl DatasetConfig {
    /// Load the configured dataset into memory
    pub fn load_store(&self) -> Result<InMemoryStore> {
        let store = match self.format {
            DatasetFormat::Sqlite => InMemoryStore::from_sqlite(&self.path)?,
            DatasetFormat::Csv => InMemoryStore::from_csv_dir(&self.path)?,
        };
        Ok(store)
    }
}

impl QueryConfig {
    /// Load configuration from environment variables and defaults
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        // Override with environment variables if present
        if let Ok(bind_addr) = env::var("CLIMATE_QUERY_BIND_ADDRESS") {
            config.bind_address = bind_addr;
        }

        if let Ok(path) = env::var("CLIMATE_DATASET_PATH") {
            config.dataset.path = PathBuf::from(path);
        }

        if let Ok(format) = env::var("CLIMATE_DATASET_FORMAT") {
            config.dataset.format = format.parse()?;
        }

        if let Ok(enable_metrics) = env::var("CLIMATE_METRICS_ENABLE") {
            config.metrics.enable_prometheus = enable_metrics.parse()?;
        }

        if let Ok(threshold) = env::var("CLIMATE_SLOW_QUERY_THRESHOLD_MS") {
            config.metrics.slow_query_threshold_ms = threshold.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.bind_address.trim().is_empty() {
            return Err(ClimateError::configuration("Bind address cannot be empty").into());
        }

        if self.dataset.path.as_os_str().is_empty() {
            return Err(ClimateError::configuration("Dataset path cannot be empty").into());
        }

        Ok(())
    }
}
