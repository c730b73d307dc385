use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use envelope_core::{classify, ApiResponse, EnvelopeConfig, Failure};

use crate::config::envelope_config;
use crate::response::render;

/// Application-level error type for HTTP handlers.
///
/// Wraps a raised [`Failure`] and the extractor rejections axum produces, and
/// implements [`IntoResponse`] so every error leaves as a JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure raised by handler code.
    #[error(transparent)]
    Failure(#[from] Failure),

    /// The request body was missing or not valid JSON for the handler.
    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error(transparent)]
    Path(#[from] PathRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Turn the error into a classifiable failure. Extractor rejections become
    /// validation failures on the part of the request they rejected.
    pub fn into_failure(self) -> Failure {
        match self {
            AppError::Failure(failure) => failure,
            AppError::Json(rejection) => {
                rejection_failure("body", rejection.status().as_u16(), rejection.body_text())
            }
            AppError::Path(rejection) => {
                rejection_failure("path", rejection.status().as_u16(), rejection.body_text())
            }
            AppError::Query(rejection) => {
                rejection_failure("query", rejection.status().as_u16(), rejection.body_text())
            }
        }
    }
}

#[track_caller]
fn rejection_failure(field: &str, status: u16, message: String) -> Failure {
    let mut field_errors = envelope_core::FieldErrors::new();
    field_errors.insert(field.to_string(), vec![message]);
    Failure::validation_with_status(u32::from(status), field_errors)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        render_failure(self.into_failure(), envelope_config())
    }
}

/// Log `failure` and render it as an envelope.
///
/// Server-side failures are logged at `error` with their raw message; the
/// envelope itself only carries the classified message.
pub fn render_failure(failure: Failure, config: &EnvelopeConfig) -> Response {
    let code = classify(&failure).code;
    if code >= 500 {
        tracing::error!(
            code,
            error = %failure,
            file = failure.file(),
            line = failure.line(),
            "Request failed with server error"
        );
    } else {
        tracing::debug!(code, error = %failure, "Request failed with client error");
    }

    render(ApiResponse::from_failure(failure), config)
}
