//! Configuration schema definitions.
//!
//! Every field has a default so the relay runs without any config file.
//! All types derive Serde traits for deserialization from TOML.

use serde::{Deserialize, Serialize};

/// Downstream endpoint every forwarded payload is posted to.
pub const DEFAULT_DOWNSTREAM_URL: &str = "https://next-chicken-241.convex.site/raw";

/// Service name reported by the health endpoint.
pub const DEFAULT_SERVICE_NAME: &str = "HikVision Webhook Proxy";

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind host, port, body limit).
    pub listener: ListenerConfig,

    /// Forwarding behavior.
    pub relay: ForwardConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind (all interfaces by default).
    pub host: String,

    /// TCP port. Overridden by the `PORT` environment variable.
    pub port: u16,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10_000,
            max_body_bytes: 10 * 1024 * 1024, // 10MB
        }
    }
}

/// Forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ForwardConfig {
    /// Endpoint receiving the JSON payloads.
    pub downstream_url: String,

    /// Name reported by `GET /health`.
    pub service_name: String,

    /// Forward POST bodies that hit the catch-all route instead of answering 404.
    pub forward_unmatched_posts: bool,

    /// Number of characters of the body logged per webhook.
    pub body_preview_chars: usize,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            downstream_url: DEFAULT_DOWNSTREAM_URL.to_string(),
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            forward_unmatched_posts: false,
            body_preview_chars: 1000,
        }
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
