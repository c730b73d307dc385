pub mod health;

use axum::routing::{get, post};
use axum::Router;
use envelope_core::ResponseFactory;

use crate::error::AppError;
use crate::handlers;

/// Build the `/api/v1` route tree.
///
/// ```text
/// POST /echo              wrap the JSON body (?std, ?camel, ?list)
/// GET  /status/{code}     raise or answer with the given code (?message)
/// GET  /sequence          a paginated run of integers (?page, ?per_page, ?total)
/// ```
pub fn api_routes() -> Router {
    Router::new()
        .route("/echo", post(handlers::echo::echo))
        .route("/status/{code}", get(handlers::status::raise_status))
        .route("/sequence", get(handlers::sequence::list_sequence))
}

/// Router fallback: unknown paths get a 404 envelope.
pub async fn not_found() -> AppError {
    ResponseFactory.error_not_found(None).into()
}

/// Known path, unsupported method.
pub async fn method_not_allowed() -> AppError {
    ResponseFactory.error_method_not_allowed(None).into()
}
