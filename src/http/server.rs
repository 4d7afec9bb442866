//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router with the relay's routes
//! - Wire up middleware (request ID, tracing, request log, body limit)
//! - Bind to the listener and serve until shutdown

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::RelayConfig;
use crate::http::handlers::{catch_all, health, receive_webhook, webhook_probe};
use crate::http::request::log_request;
use crate::lifecycle::shutdown;
use crate::relay::Forwarder;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub forwarder: Forwarder,
    /// Port the listener actually bound, reported by `/health`.
    pub port: u16,
}

/// Build the router with all middleware layers.
///
/// Unregistered methods on known paths fall through to the catch-all
/// instead of axum's default 405.
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.listener.max_body_bytes;

    Router::new()
        .route("/health", get(health).fallback(catch_all))
        .route(
            "/webhook/hikvision",
            post(receive_webhook).get(webhook_probe).fallback(catch_all),
        )
        .fallback(catch_all)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::from_fn(log_request))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// HTTP server for the relay.
pub struct RelayServer {
    config: Arc<RelayConfig>,
    forwarder: Forwarder,
}

impl RelayServer {
    /// Create a server posting to the configured downstream URL.
    pub fn new(config: RelayConfig) -> Self {
        let forwarder = Forwarder::new(config.relay.downstream_url.clone());
        Self {
            config: Arc::new(config),
            forwarder,
        }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            downstream = %self.forwarder.url(),
            forward_unmatched_posts = self.config.relay.forward_unmatched_posts,
            "Relay listening"
        );

        let app = build_router(AppState {
            config: self.config,
            forwarder: self.forwarder,
            port: addr.port(),
        });

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
