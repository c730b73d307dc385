use axum::{routing::get, Router};
use envelope_core::ResponseFactory;

use crate::response::Reply;

async fn health_check() -> Reply {
    ResponseFactory
        .successful(Some("ok"))
        .add_meta("version", env!("CARGO_PKG_VERSION"))
        .into()
}

pub fn router() -> Router {
    Router::new().route("/health", get(health_check))
}
