//! Climate Query Service Library
//!
//! This library provides the core components for the climate query service,
//! including the query engine, temperature aggregation, and HTTP handlers.

// Core modules
pub mod aggregation;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod query_engine;

use axum::{routing::get, Router};
use climate_core::datastore::DatasetStore;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types
pub use config::QueryConfig;
pub use metrics::QueryMetricsCollector;
pub use query_engine::QueryEngine;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub query_engine: Arc<QueryEngine>,
    pub config: Arc<QueryConfig>,
    pub metrics: Arc<QueryMetricsCollector>,
}

impl AppState {
    /// Build state around a dataset store
    pub fn new(store: Arc<dyn DatasetStore>, config: Arc<QueryConfig>) -> Self {
        Self {
            query_engine: Arc::new(QueryEngine::new(store)),
            config,
            metrics: Arc::new(QueryMetricsCollector::new()),
        }
    }
}

/// Build the static route table
pub fn create_router(state: AppState) -> Router {
    use handlers::*;

    Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1.0/precipitation", get(precipitation_handler))
        .route("/api/v1.0/stations", get(stations_handler))
        .route("/api/v1.0/tobs", get(tobs_handler))
        .route("/api/v1.0/:start", get(start_handler))
        .route("/api/v1.0/:start/:end", get(start_end_handler))
        .fallback(not_found_handler)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
