//! Metrics collection and reporting for the query service

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Thread-safe metrics collector for query routes
#[derive(Debug)]
pub struct QueryMetricsCollector {
    /// Total requests served by query routes
    pub requests_total: AtomicU64,

    /// Requests rejected because of bad input
    pub client_errors_total: AtomicU64,

    /// Requests that failed on the server side
    pub server_errors_total: AtomicU64,

    /// Total rows returned
    pub rows_returned_total: AtomicU64,

    /// Total request execution time
    pub query_time_total_ms: AtomicU64,

    /// Slow requests (above threshold)
    pub slow_queries_total: AtomicU64,

    /// Service start time
    start_time: Instant,
}

impl Default for QueryMetricsCollector {
    fn default() -> Self {
        Self {
            requests_total: AtomicU64::new(0),
            client_errors_total: AtomicU64::new(0),
            server_errors_total: AtomicU64::new(0),
            rows_returned_total: AtomicU64::new(0),
            query_time_total_ms: AtomicU64::new(0),
            slow_queries_total: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }
}

impl QueryMetricsCollector {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed request
    pub fn record_query(
        &self,
        duration: Duration,
        rows_returned: usize,
        slow_query_threshold_ms: u64,
    ) {
        self.rows_returned_total
            .fetch_add(rows_returned as u64, Ordering::Relaxed);
        self.record_request(duration, slow_query_threshold_ms);
    }

    /// Record a failed request; its time counts towards the average too
    pub fn record_error(
        &self,
        duration: Duration,
        client_error: bool,
        slow_query_threshold_ms: u64,
    ) {
        self.record_request(duration, slow_query_threshold_ms);
        if client_error {
            self.client_errors_total.fetch_add(1, Ordering::Relaxed);
        } else {
            self.server_errors_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn record_request(&self, duration: Duration, slow_query_threshold_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        let duration_ms = duration.as_millis() as u64;
        self.query_time_total_ms
            .fetch_add(duration_ms, Ordering::Relaxed);

        if duration_ms > slow_query_threshold_ms {
            self.slow_queries_total.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> QueryMetricsSnapshot {
        let requests = self.requests_total.load(Ordering::Relaxed);
        let total_time = self.query_time_total_ms.load(Ordering::Relaxed);

        QueryMetricsSnapshot {
            requests_total: requests,
            client_errors_total: self.client_errors_total.load(Ordering::Relaxed),
            server_errors_total: self.server_errors_total.load(Ordering::Relaxed),
            rows_returned_total: self.rows_returned_total.load(Ordering::Relaxed),
            query_time_total_ms: total_time,
            slow_queries_total: self.slow_queries_total.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            avg_query_time_ms: if requests > 0 {
                total_time as f64 / requests as f64
            } else {
                0.0
            },
        }
    }

    /// Generate Prometheus format metrics
    pub fn prometheus_format(&self) -> String {
        let snapshot = self.snapshot();

        format!(
            "# HELP climate_query_requests_total Total number of query requests\n\
             # TYPE climate_query_requests_total counter\n\
             climate_query_requests_total {}\n\
             \n\
             # HELP climate_query_errors_total Total number of failed query requests\n\
             # TYPE climate_query_errors_total counter\n\
             climate_query_errors_total{{class=\"client\"}} {}\n\
             climate_query_errors_total{{class=\"server\"}} {}\n\
             \n\
             # HELP climate_query_rows_returned_total Total number of rows returned\n\
             # TYPE climate_query_rows_returned_total counter\n\
             climate_query_rows_returned_total {}\n\
             \n\
             # HELP climate_query_time_total_ms Total query execution time in milliseconds\n\
             # TYPE climate_query_time_total_ms counter\n\
             climate_query_time_total_ms {}\n\
             \n\
             # HELP climate_query_slow_queries_total Total number of slow queries\n\
             # TYPE climate_query_slow_queries_total counter\n\
             climate_query_slow_queries_total {}\n\
             \n\
             # HELP climate_query_uptime_seconds Service uptime in seconds\n\
             # TYPE climate_query_uptime_seconds gauge\n\
             climate_query_uptime_seconds {}\n\
             \n\
             # HELP climate_query_avg_time_ms Average query execution time in milliseconds\n\
             # TYPE climate_query_avg_time_ms gauge\n\
             climate_query_avg_time_ms {}\n",
            snapshot.requests_total,
            snapshot.client_errors_total,
            snapshot.server_errors_total,
            snapshot.rows_returned_total,
            snapshot.query_time_total_ms,
            snapshot.slow_queries_total,
            snapshot.uptime_seconds,
            snapshot.avg_query_time_ms
        )
    }
}

/// Snapshot of query metrics at a point in time
#[derive(Debug, Clone)]
pub struct QueryMetricsSnapshot {
    pub requests_total: u64,
    pub client_errors_total: u64,
    pub server_errors_total: u64,
    pub rows_returned_total: u64,
    pub query_time_total_ms: u64,
    pub slow_queries_total: u64,
    pub uptime_seconds: u64,
    pub avg_query_time_ms: f64,
}

/// Helper for timing query operations
pub struct QueryTimer {
    start: Instant,
}

impl QueryTimer {
    /// Start a new query timer
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Get elapsed duration
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finish timing and record to metrics collector
    pub fn finish(
        self,
        collector: &QueryMetricsCollector,
        rows_returned: usize,
        slow_threshold_ms: u64,
    ) {
        collector.record_query(self.elapsed(), rows_returned, slow_threshold_ms);
    }

    /// Finish timing a failed request
    pub fn fail(
        self,
        collector: &QueryMetricsCollector,
        client_error: bool,
        slow_threshold_ms: u64,
    ) {
        collector.record_error(self.elapsed(), client_error, slow_threshold_ms);
    }
}
