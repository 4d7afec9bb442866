//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, request log)
//!     → handlers.rs (health, webhook POST/GET, catch-all)
//!     → relay (decode + forward)
//!     → response.rs (OK / 500 JSON / 404)
//! ```

pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use response::RelayError;
pub use server::{build_router, AppState, RelayServer};
