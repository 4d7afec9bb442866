//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! handlers / forwarder / middleware produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (opt-in)
//! ```
//!
//! # Design Decisions
//! - Request ID is attached to every request log line
//! - Metrics are cheap and disabled unless configured

pub mod logging;
pub mod metrics;
