//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define fixture metrics (requests, latency, client disconnects)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `fixture_requests_total` (counter): requests by behavior, status
//! - `fixture_request_duration_seconds` (histogram): latency by behavior
//! - `fixture_client_closed_total` (counter): waits abandoned by the client
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op
//! - Labels are static behavior names, never raw paths

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => {
            tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter")
        }
    }
}

/// Record one completed request.
pub fn record_request(behavior: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "fixture_requests_total",
        "behavior" => behavior,
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!("fixture_request_duration_seconds", "behavior" => behavior)
        .record(start.elapsed().as_secs_f64());
}

/// Record a request abandoned by its client before the response was ready.
pub fn record_client_closed(behavior: &'static str) {
    metrics::counter!("fixture_client_closed_total", "behavior" => behavior).increment(1);
}
