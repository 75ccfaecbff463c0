// Metrics module for Prometheus observability
// Author: kelexine (https://github.com/kelexine)

mod registry;

pub use registry::{
    gather_metrics,
    REQUESTS_TOTAL,
    REQUEST_DURATION,
    UPSTREAM_CALLS,
    UPSTREAM_DURATION,
    CACHE_OPERATIONS,
    CACHE_ENTRIES,
    RATE_LIMIT_DECISIONS,
};

use crate::rate_limit::Admission;

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint])
        .observe(duration_secs);
}

/// Helper to record an Anthropic API call; `status_code` is `None` when no
/// response arrived (transport error, timeout).
pub fn record_upstream_call(status_code: Option<u16>, duration_secs: f64) {
    let label = status_code.map_or_else(|| "error".to_string(), |code| code.to_string());
    UPSTREAM_CALLS.with_label_values(&[&label]).inc();
    UPSTREAM_DURATION.observe(duration_secs);
}

/// Helpers to record response cache operations
pub fn record_cache_hit() {
    CACHE_OPERATIONS.with_label_values(&["hit"]).inc();
}

pub fn record_cache_miss() {
    CACHE_OPERATIONS.with_label_values(&["miss"]).inc();
}

pub fn record_cache_write() {
    CACHE_OPERATIONS.with_label_values(&["write"]).inc();
}

pub fn update_cache_entries(count: usize) {
    CACHE_ENTRIES.set(count as f64);
}

/// Helper to record a rate limiter decision
pub fn record_rate_limit(decision: Admission) {
    let label = match decision {
        Admission::Allowed => "allowed",
        Admission::Denied => "denied",
    };
    RATE_LIMIT_DECISIONS.with_label_values(&[label]).inc();
}
