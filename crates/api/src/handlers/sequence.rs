use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use envelope_core::{Page, ResponseFactory};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::Reply;

/// Upper bound on `per_page`.
const MAX_PER_PAGE: u64 = 100;

#[derive(Debug, Deserialize)]
pub struct SequenceParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    #[serde(default = "default_total")]
    pub total: u64,
    /// Standard format: page position under `data.page`, items under `data.list`.
    #[serde(default)]
    pub std: bool,
}

fn default_page() -> u64 {
    1
}

fn default_per_page() -> u64 {
    15
}

fn default_total() -> u64 {
    50
}

#[derive(Debug, Serialize)]
pub struct SequenceItem {
    pub position: u64,
    pub is_even: bool,
}

/// GET /api/v1/sequence
///
/// Pages through the integers `1..=total`.
pub async fn list_sequence(params: Result<Query<SequenceParams>, QueryRejection>) -> AppResult<Reply> {
    let Query(params) = params?;
    let page = params.page.max(1);
    let per_page = params.per_page.clamp(1, MAX_PER_PAGE);

    let start = (page - 1).saturating_mul(per_page).saturating_add(1);
    let end = start.saturating_add(per_page - 1).min(params.total);
    let items: Vec<SequenceItem> = (start..=end)
        .map(|position| SequenceItem {
            position,
            is_even: position % 2 == 0,
        })
        .collect();

    let mut response = ResponseFactory.collection(Page::new(items, page, per_page, params.total));
    if params.std {
        response = response.std();
    }

    Ok(response.into())
}
