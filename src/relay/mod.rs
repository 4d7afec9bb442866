//! Webhook relay core.
//!
//! # Data Flow
//! ```text
//! inbound body bytes
//!     → payload.rs (JSON first, raw text fallback)
//!     → forwarder.rs (single POST to the downstream URL)
//!     → ForwardOutcome | ForwardError
//! ```
//!
//! # Design Decisions
//! - Exactly one downstream attempt per webhook; no retry, no queue
//! - No timeout on the downstream call
//! - Downstream status is logged, never propagated

pub mod forwarder;
pub mod payload;

pub use forwarder::{ForwardError, ForwardOutcome, Forwarder};
pub use payload::WebhookPayload;
