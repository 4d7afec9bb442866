//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): inbound requests by method, status
//! - `relay_request_duration_seconds` (histogram): inbound latency
//! - `relay_forwards_total` (counter): downstream calls by outcome
//! - `relay_forward_duration_seconds` (histogram): downstream latency
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one inbound request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method_label(method)),
        ("status", status.to_string()),
    ];
    counter!("relay_requests_total", &labels).increment(1);
    histogram!("relay_request_duration_seconds", &labels).record(start.elapsed().as_secs_f64());
}

/// Record one downstream call.
pub fn record_forward(outcome: &'static str, start: Instant) {
    counter!("relay_forwards_total", "outcome" => outcome).increment(1);
    histogram!("relay_forward_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Collapse arbitrary methods so label cardinality stays bounded.
fn method_label(method: &str) -> String {
    match method {
        "GET" | "POST" | "PUT" | "PATCH" | "DELETE" | "HEAD" | "OPTIONS" => method.to_string(),
        _ => "OTHER".to_string(),
    }
}
