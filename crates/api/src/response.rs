//! HTTP rendering of prepared envelopes.
//!
//! Handlers return [`Reply`] (usually via `.into()` on an [`ApiResponse`]).
//! Every envelope is sent with HTTP 200 and `Content-Type: application/json`;
//! the semantic status lives in the envelope's `code`.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use envelope_core::{ApiResponse, EnvelopeConfig};

use crate::config::envelope_config;

/// An [`ApiResponse`] on its way out of a handler.
#[derive(Debug)]
pub struct Reply(pub ApiResponse);

impl From<ApiResponse> for Reply {
    fn from(response: ApiResponse) -> Self {
        Self(response)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        render(self.0, envelope_config())
    }
}

/// Prepare `response` with `config` and wrap the body in an HTTP response.
///
/// A content encoding error is not an envelope-able failure: it is logged and
/// answered with a plain-text 500.
pub fn render(response: ApiResponse, config: &EnvelopeConfig) -> Response {
    match response.into_body(config) {
        Ok(body) => (
            StatusCode::OK,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Failed to encode response envelope");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response()
        }
    }
}
