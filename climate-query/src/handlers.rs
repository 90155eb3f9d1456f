use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, Json},
};
use climate_core::{
    error::{ClimateError, ClimateResult},
    query::{
        PrecipitationResult, StationResult, TemperatureObservationResult, TemperatureStatsResult,
    },
};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::{metrics::QueryTimer, AppState};

/// Error half of every query handler's result
pub type ApiError = (StatusCode, Json<Value>);

/// Human-readable index of the available routes
pub const HOME_PAGE: &str = "Welcome to the Hawaii weather API!<br/>\
Available Routes:<br/>\
<br/>\
/api/v1.0/precipitation<br/>\
Dates and precipitation for the last year of data.<br/><br/>\
/api/v1.0/stations<br/>\
JSON list of weather stations.<br/><br/>\
/api/v1.0/tobs<br/>\
Station names, dates and temperature observations for the last year of data.<br/><br/>\
/api/v1.0/&lt;start&gt;<br/>\
Minimum, average and maximum temperature from a given date (YYYY-MM-DD) onward.<br/><br/>\
/api/v1.0/&lt;start&gt;/&lt;end&gt;<br/>\
Minimum, average and maximum temperature between two dates, inclusive.<br/>";

/// Map a query error onto a status code and JSON body.
///
/// Client errors carry their message; server errors are logged and the body
/// carries only the category.
pub fn error_response(err: &ClimateError) -> ApiError {
    if err.is_client_error() {
        warn!("Rejected query: {}", err);
        let title = match err {
            ClimateError::InvalidRange { .. } => "Invalid date range",
            _ => "Invalid date",
        };
        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": title,
                "message": err.to_string(),
                "category": err.category()
            })),
        )
    } else {
        error!("Query execution failed: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": "Internal server error",
                "category": err.category()
            })),
        )
    }
}

fn finish<T>(
    state: &AppState,
    route: &str,
    timer: QueryTimer,
    result: ClimateResult<Vec<T>>,
) -> Result<Json<Vec<T>>, ApiError> {
    match result {
        Ok(rows) => {
            debug!("{} returned {} rows in {:?}", route, rows.len(), timer.elapsed());
            timer.finish(
                &state.metrics,
                rows.len(),
                state.config.metrics.slow_query_threshold_ms,
            );
            Ok(Json(rows))
        }
        Err(err) => {
            timer.fail(
                &state.metrics,
                err.is_client_error(),
                state.config.metrics.slow_query_threshold_ms,
            );
            Err(error_response(&err))
        }
    }
}

/// Route index
pub async fn home_handler() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.query_engine.dataset_size().await {
        Ok((measurements, stations)) => Ok(Json(json!({
            "status": "healthy",
            "service": "climate-query",
            "version": climate_core::VERSION,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "measurements": measurements,
            "stations": stations
        }))),
        Err(err) => {
            error!("Health check failed: {}", err);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "service": "climate-query",
                    "category": err.category()
                })),
            ))
        }
    }
}

/// Metrics endpoint (Prometheus format)
pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    if !state.config.metrics.enable_prometheus {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(state.metrics.prometheus_format())
}

/// Precipitation for the last year of data
pub async fn precipitation_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<PrecipitationResult>>, ApiError> {
    let timer = QueryTimer::start();
    let result = state.query_engine.precipitation_recent_year().await;
    finish(&state, "precipitation", timer, result)
}

/// All weather stations
pub async fn stations_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<StationResult>>, ApiError> {
    let timer = QueryTimer::start();
    let result = state.query_engine.list_stations().await;
    finish(&state, "stations", timer, result)
}

/// Temperature observations for the last year of data
pub async fn tobs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<TemperatureObservationResult>>, ApiError> {
    let timer = QueryTimer::start();
    let result = state.query_engine.temperature_observations_recent_year().await;
    finish(&state, "tobs", timer, result)
}

/// Temperature statistics from a start date onward
pub async fn start_handler(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> Result<Json<Vec<TemperatureStatsResult>>, ApiError> {
    debug!("Received temperature stats query from {}", start);

    let timer = QueryTimer::start();
    let result = state
        .query_engine
        .temperature_stats(&start, None)
        .await
        .map(|stats| vec![stats]);
    finish(&state, "start", timer, result)
}

/// Temperature statistics between two dates, inclusive
pub async fn start_end_handler(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<TemperatureStatsResult>>, ApiError> {
    debug!("Received temperature stats query from {} to {}", start, end);

    let timer = QueryTimer::start();
    let result = state
        .query_engine
        .temperature_stats(&start, Some(end.as_str()))
        .await
        .map(|stats| vec![stats]);
    finish(&state, "start_end", timer, result)
}

/// JSON 404 for unknown routes
pub async fn not_found_handler(uri: Uri) -> ApiError {
    info!("No route for {}", uri);
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "message": format!("No route for {}", uri.path())
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        let (status, Json(body)) = error_response(&ClimateError::invalid_date("2016/08/22"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid date");
        assert_eq!(body["category"], "invalid_date");
        assert!(body["message"].as_str().unwrap().contains("2016/08/22"));

        let (status, Json(body)) =
            error_response(&ClimateError::invalid_range("2017-02-01", "2017-01-01"));
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid date range");
    }

    #[test]
    fn test_server_errors_hide_details() {
        let (status, Json(body)) =
            error_response(&ClimateError::data_access("disk /var/lib/climate unreadable"));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["category"], "data_access");
        assert!(body.get("message").is_none());
        assert!(!body.to_string().contains("/var/lib/climate"));

        let (status, _) = error_response(&ClimateError::EmptyDataset);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
