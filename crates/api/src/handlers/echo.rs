//! Echo handler: wraps whatever JSON it receives, so clients can see how the
//! envelope options change the output.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::Query;
use axum::Json;
use envelope_core::ResponseFactory;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppResult;
use crate::response::Reply;

#[derive(Debug, Default, Deserialize)]
pub struct EchoParams {
    /// Standard format (implies camelCase keys).
    #[serde(default)]
    pub std: bool,
    #[serde(default)]
    pub camel: bool,
    /// Treat the body as a collection.
    #[serde(default)]
    pub list: bool,
}

/// POST /api/v1/echo
pub async fn echo(
    params: Result<Query<EchoParams>, QueryRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Reply> {
    let Query(params) = params?;
    let Json(body) = payload?;

    let factory = ResponseFactory;
    let mut response = if params.list {
        factory.collection(body)
    } else {
        factory.item(body)
    };
    response = response.enable_keys_to_camel(params.camel);
    if params.std {
        response = response.std();
    }

    Ok(response.into())
}
