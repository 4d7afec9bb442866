//! Downstream delivery.
//!
//! One `POST` per webhook. The caller waits for it, but the call runs on its
//! own task so a caller that hangs up cannot cut it short. The downstream
//! status is logged but never changes the caller's answer; only transport
//! and body-read failures are errors.

use std::time::Instant;

use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::observability::metrics;
use crate::relay::payload::WebhookPayload;

/// Failure while talking to the downstream endpoint.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("failed to send webhook downstream: {0}")]
    Send(#[source] reqwest::Error),

    #[error("failed to read downstream response: {0}")]
    ReadBody(#[source] reqwest::Error),

    #[error("forwarding task did not finish: {0}")]
    Task(#[source] tokio::task::JoinError),
}

/// What the downstream endpoint answered.
#[derive(Debug, Clone)]
pub struct ForwardOutcome {
    pub status: StatusCode,
    pub body: String,
}

/// Posts payloads to the configured downstream URL.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client,
    url: String,
}

impl Forwarder {
    /// Create a forwarder with a default `reqwest` client.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), url)
    }

    /// Create a forwarder sharing an existing client.
    pub fn with_client(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Downstream URL payloads are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Forward on a detached task and wait for it.
    ///
    /// Dropping the returned future (client disconnect) leaves the
    /// downstream call running to completion.
    pub async fn forward_detached(
        &self,
        request_id: String,
        payload: WebhookPayload,
    ) -> Result<ForwardOutcome, ForwardError> {
        let forwarder = self.clone();
        tokio::spawn(async move { forwarder.forward(&request_id, &payload).await })
            .await
            .map_err(ForwardError::Task)?
    }

    /// Send `payload` as JSON and wait for the full response.
    pub async fn forward(
        &self,
        request_id: &str,
        payload: &WebhookPayload,
    ) -> Result<ForwardOutcome, ForwardError> {
        let start = Instant::now();

        let result = self.send(payload).await;
        metrics::record_forward(if result.is_ok() { "delivered" } else { "failed" }, start);

        match &result {
            Ok(outcome) if outcome.status.is_success() => {
                tracing::info!(
                    request_id = %request_id,
                    status = %outcome.status,
                    response = %outcome.body,
                    "Forwarded to downstream"
                );
            }
            Ok(outcome) => {
                tracing::warn!(
                    request_id = %request_id,
                    status = %outcome.status,
                    response = %outcome.body,
                    "Downstream answered with non-success status"
                );
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, url = %self.url, error = %e, "Forwarding failed");
            }
        }

        result
    }

    async fn send(&self, payload: &WebhookPayload) -> Result<ForwardOutcome, ForwardError> {
        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(&self.url)
            .json(&payload.to_json())
            .send()
            .await
            .map_err(ForwardError::Send)?;

        let status = response.status();
        let body = response.text().await.map_err(ForwardError::ReadBody)?;

        Ok(ForwardOutcome { status, body })
    }
}
