//! Paginated collections and the page-position metadata extracted from them.

use serde::{Deserialize, Serialize};

/// Page-position metadata placed under `meta.pagination` (or `data.page` in
/// standard format).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub current_page: u64,
    /// 1-based index of the first item on this page; `None` for an empty page.
    pub from: Option<u64>,
    pub last_page: u64,
    pub per_page: u64,
    pub total: u64,
}

impl PaginationMeta {
    /// Derive `from` and `last_page` from the page position and item count.
    ///
    /// `current_page` and `per_page` are treated as at least 1.
    pub fn new(current_page: u64, per_page: u64, total: u64, item_count: usize) -> Self {
        let current_page = current_page.max(1);
        let per_page = per_page.max(1);
        let last_page = total.div_ceil(per_page).max(1);
        let from = (item_count > 0).then(|| (current_page - 1) * per_page + 1);

        Self {
            current_page,
            from,
            last_page,
            per_page,
            total,
        }
    }
}

/// One page of a larger collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, current_page: u64, per_page: u64, total: u64) -> Self {
        let pagination = PaginationMeta::new(current_page, per_page, total, items.len());
        Self { items, pagination }
    }
}
