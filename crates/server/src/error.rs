//! HTTP error mapping for the docview server.
//!
//! Wraps the core error so axum handlers can use `?`, and maps each
//! error family to its status code: invalid input → 400, cache miss →
//! 404, everything else → 500. Bodies are plain status text; internal
//! detail goes to the log, never the client page.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use docview_core::Error;

/// Error wrapper carrying a core error into an HTTP response.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error = self.0;
        let status = if error.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else if matches!(error, Error::CacheMiss(_)) {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %error, "request failed");
        } else {
            tracing::debug!(error = %error, status = status.as_u16(), "request rejected");
        }

        (status, error.to_string()).into_response()
    }
}
