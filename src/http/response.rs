//! Mapping relay failures to HTTP responses.
//!
//! The caller only ever sees three shapes: `200 OK`, `500 {"error": ...}`
//! and `404 Not found`. Error details stay in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::relay::ForwardError;

/// Message returned to the caller when forwarding fails.
pub const FORWARD_FAILURE_MESSAGE: &str = "Failed to forward webhook";

/// Errors a handler can end a request with.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Forward(#[from] ForwardError),

    #[error("Not found")]
    NotFound,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        match self {
            RelayError::Forward(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: FORWARD_FAILURE_MESSAGE,
                }),
            )
                .into_response(),
            RelayError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
        }
    }
}

/// Reply sent once the downstream call completed.
pub fn delivered() -> Response {
    (StatusCode::OK, "OK").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn not_found_is_plain_text() {
        let response = RelayError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Not found");
    }

    #[tokio::test]
    async fn delivered_is_ok_text() {
        let response = delivered();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"OK");
    }
}
