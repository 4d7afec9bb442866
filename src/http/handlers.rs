//! Route handlers.

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode, Uri},
    response::Response,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::http::request::request_id;
use crate::http::response::{delivered, RelayError};
use crate::http::server::AppState;
use crate::relay::WebhookPayload;

/// Body of `GET /webhook/hikvision`.
pub const PROBE_REPLY: &str = "Webhook endpoint ready. Use POST to send data.";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: String,
    pub timestamp: DateTime<Utc>,
    pub port: u16,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: state.config.relay.service_name.clone(),
        timestamp: Utc::now(),
        port: state.port,
    })
}

/// `GET /webhook/hikvision`. Devices probe with GET before they POST.
pub async fn webhook_probe(headers: HeaderMap) -> (StatusCode, &'static str) {
    tracing::warn!(request_id = %request_id(&headers), "Received GET on webhook endpoint");
    (StatusCode::OK, PROBE_REPLY)
}

/// `POST /webhook/hikvision`
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    tracing::info!(request_id = %request_id(&headers), "Received POST from HikVision");
    relay(&state, &headers, &body).await
}

/// Anything no route (or no method on a route) matched.
pub async fn catch_all(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    tracing::warn!(
        request_id = %request_id(&headers),
        method = %method,
        path = %uri.path(),
        "Unmatched request"
    );

    if method == Method::POST && state.config.relay.forward_unmatched_posts {
        return relay(&state, &headers, &body).await;
    }

    Err(RelayError::NotFound)
}

/// Decode the body and forward it downstream.
async fn relay(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<Response, RelayError> {
    let request_id = request_id(headers);
    let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());

    let payload = WebhookPayload::decode(content_type, body);
    tracing::info!(
        request_id = %request_id,
        kind = payload.kind(),
        body = %payload.preview(state.config.relay.body_preview_chars),
        "Webhook body"
    );

    state
        .forwarder
        .forward_detached(request_id.to_string(), payload)
        .await?;
    Ok(delivered())
}
