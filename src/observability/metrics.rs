//! Metrics collection and exposition.
//!
//! # Metrics
//! - `webplayer_upstream_requests_total` (counter): upstream calls by endpoint, status
//! - `webplayer_upstream_duration_seconds` (histogram): time to upstream response
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one upstream call. `status` is the HTTP status or an error label.
pub fn record_upstream(endpoint: &'static str, status: &str, start: Instant) {
    ::metrics::counter!(
        "webplayer_upstream_requests_total",
        "endpoint" => endpoint,
        "status" => status.to_string()
    )
    .increment(1);
    ::metrics::histogram!("webplayer_upstream_duration_seconds", "endpoint" => endpoint)
        .record(start.elapsed().as_secs_f64());
}
