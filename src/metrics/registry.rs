// Prometheus metrics registry and collectors
// Author: kelexine (https://github.com/kelexine)

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_gauge_with_registry,
    register_histogram_vec_with_registry, register_histogram_with_registry, CounterVec, Encoder,
    Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // ============================================================================
    // REQUEST METRICS
    // ============================================================================

    /// Total number of inbound requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of inbound requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).expect("requests_total registers once");

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["method", "endpoint"],
        REGISTRY
    ).expect("request_duration_seconds registers once");

    // ============================================================================
    // UPSTREAM METRICS
    // ============================================================================

    /// Calls made to the Anthropic API, by HTTP status ("error" when none was received)
    pub static ref UPSTREAM_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("upstream_calls_total", "Total Anthropic API calls"),
        &["status_code"],
        REGISTRY
    ).expect("upstream_calls_total registers once");

    /// Anthropic API call duration
    pub static ref UPSTREAM_DURATION: Histogram = register_histogram_with_registry!(
        HistogramOpts::new("upstream_duration_seconds", "Anthropic API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        REGISTRY
    ).expect("upstream_duration_seconds registers once");

    // ============================================================================
    // ADMISSION METRICS
    // ============================================================================

    /// Cache operations
    pub static ref CACHE_OPERATIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("cache_operations_total", "Total response cache operations"),
        &["operation"], // operation: hit, miss, write
        REGISTRY
    ).expect("cache_operations_total registers once");

    /// Stored cache entries after the last write
    pub static ref CACHE_ENTRIES: Gauge = register_gauge_with_registry!(
        Opts::new("cache_entries_current", "Current number of cache entries"),
        REGISTRY
    ).expect("cache_entries_current registers once");

    /// Rate limiter decisions
    pub static ref RATE_LIMIT_DECISIONS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("rate_limit_decisions_total", "Total rate limiter decisions"),
        &["decision"], // decision: allowed, denied
        REGISTRY
    ).expect("rate_limit_decisions_total registers once");
}

/// Render every registered metric in the Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}
