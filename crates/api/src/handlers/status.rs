use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query};
use envelope_core::{ApiResponse, Content, Failure};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::Reply;

#[derive(Debug, Default, Deserialize)]
pub struct StatusParams {
    pub message: Option<String>,
}

/// GET /api/v1/status/{code}
///
/// Codes below 400 answer with an empty envelope carrying that code; anything
/// else is raised as a failure built from the raw `(code, message)` pair and
/// goes through classification.
pub async fn raise_status(
    path: Result<Path<i64>, PathRejection>,
    params: Result<Query<StatusParams>, QueryRejection>,
) -> AppResult<Reply> {
    let Path(code) = path?;
    let Query(params) = params?;
    let message = params.message.unwrap_or_default();

    match u32::try_from(code) {
        Ok(code @ 1..=399) => Ok(ApiResponse::new(Content::Null, code)
            .with_message(message)
            .into()),
        _ => Err(Failure::from_code(code, message).into()),
    }
}
