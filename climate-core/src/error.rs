//! Error types for climate dataset operations

use thiserror::Error;

/// Result type for climate dataset operations
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Error types surfaced by the dataset store and the query layer
#[derive(Error, Debug)]
pub enum ClimateError {
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidRange { start: String, end: String },

    #[error("Dataset contains no measurements")]
    EmptyDataset,

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Data access error: {0}")]
    DataAccess(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl ClimateError {
    /// Create a new invalid date error
    pub fn invalid_date<S: Into<String>>(input: S) -> Self {
        Self::InvalidDate(input.into())
    }

    /// Create a new invalid range error
    pub fn invalid_range<S: Into<String>, E: Into<String>>(start: S, end: E) -> Self {
        Self::InvalidRange {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Create a new invalid measurement error
    pub fn invalid_measurement<S: Into<String>>(message: S) -> Self {
        Self::InvalidMeasurement(message.into())
    }

    /// Create a new data access error
    pub fn data_access<S: Into<String>>(message: S) -> Self {
        Self::DataAccess(message.into())
    }

    /// Create a new configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    /// True when the error was caused by request input rather than by the
    /// deployment or the data behind it
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ClimateError::InvalidDate(_) | ClimateError::InvalidRange { .. }
        )
    }

    /// Get the error category for monitoring/metrics
    pub fn category(&self) -> &'static str {
        match self {
            ClimateError::InvalidDate(_) => "invalid_date",
            ClimateError::InvalidRange { .. } => "invalid_range",
            ClimateError::EmptyDataset => "empty_dataset",
            ClimateError::InvalidMeasurement(_) => "invalid_measurement",
            ClimateError::DataAccess(_) => "data_access",
            ClimateError::Configuration(_) => "configuration",
            ClimateError::Io(_) => "io",
            ClimateError::Csv(_) => "csv",
            ClimateError::Sqlite(_) => "sqlite",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_input_errors_only() {
        assert!(ClimateError::invalid_date("2016/08/22").is_client_error());
        assert!(ClimateError::invalid_range("2017-02-01", "2017-01-01").is_client_error());
        assert!(!ClimateError::EmptyDataset.is_client_error());
        assert!(!ClimateError::data_access("connection reset").is_client_error());
        assert!(!ClimateError::invalid_measurement("tobs NaN").is_client_error());
        assert!(!ClimateError::configuration("empty bind address").is_client_error());
    }

    #[test]
    fn test_error_messages() {
        let err = ClimateError::invalid_range("2017-02-01", "2017-01-01");
        assert_eq!(
            err.to_string(),
            "Invalid date range: end date 2017-01-01 is before start date 2017-02-01"
        );
        assert_eq!(err.category(), "invalid_range");
        assert_eq!(ClimateError::EmptyDataset.category(), "empty_dataset");
    }
}
