//! HikVision webhook relay.
//!
//! Accepts webhook callbacks from HikVision devices, logs them and forwards
//! each body as JSON to a single downstream endpoint.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use http::RelayServer;
pub use lifecycle::Shutdown;
