//! Inbound request handling.
//!
//! # Responsibilities
//! - Assign a request ID (UUID v4) unless the caller sent one
//! - Log method, path and every header of each request
//! - Record request metrics once the response is known
//!
//! Headers are logged as received. Devices authenticate with their own
//! credentials downstream, so nothing is redacted here.

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, Request},
    middleware::Next,
    response::Response,
};
use serde_json::{Map, Value};

use crate::observability::metrics;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Request ID assigned by `SetRequestIdLayer`, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Render headers as a JSON object for logging.
///
/// Repeated headers are joined with `", "`; non-UTF-8 values are replaced lossily.
pub fn headers_json(headers: &HeaderMap) -> Value {
    let mut map = Map::new();
    for name in headers.keys() {
        let joined = headers
            .get_all(name)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect::<Vec<_>>()
            .join(", ");
        map.insert(name.as_str().to_string(), Value::String(joined));
    }
    Value::Object(map)
}

/// Middleware logging every inbound request and its outcome.
pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = request_id(request.headers()).to_string();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        headers = %headers_json(request.headers()),
        "Incoming request"
    );

    let response = next.run(request).await;

    let status = response.status();
    metrics::record_request(method.as_str(), status.as_u16(), start);
    tracing::debug!(
        request_id = %request_id,
        status = status.as_u16(),
        latency_ms = start.elapsed().as_millis() as u64,
        "Request completed"
    );

    response
}
