//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional TOML file (--config / RELAY_CONFIG)
//!     → loader.rs (parse & deserialize, PORT override)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to the HTTP handlers
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload at runtime
//! - All fields have defaults so the relay starts with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ForwardConfig, ListenerConfig, LogFormat, ObservabilityConfig, RelayConfig,
    DEFAULT_DOWNSTREAM_URL,
};
pub use validation::ValidationError;
