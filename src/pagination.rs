//! Pagination metadata shared by the REST endpoints and the list controller.

use serde::{Deserialize, Serialize};

/// Page lengths a list view may request.
pub const PAGE_SIZES: [usize; 4] = [5, 10, 20, 50];

pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Returns `limit` when it is one of [`PAGE_SIZES`], the default otherwise.
pub fn clamp_page_size(limit: Option<usize>) -> usize {
    limit
        .filter(|limit| PAGE_SIZES.contains(limit))
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
}

/// Builds the navigator's page-number list; `None` marks a gap.
pub fn page_window(
    total_pages: usize,
    current_page: usize,
    left_edge: usize,
    left_current: usize,
    right_current: usize,
    right_edge: usize,
) -> Vec<Option<usize>> {
    let last_page = total_pages;

    if last_page == 0 {
        return vec![];
    }

    let mut pages = Vec::new();

    let left_end = (1 + left_edge).min(last_page + 1);
    pages.extend((1..left_end).map(Some));

    let mid_start = left_end.max(current_page.saturating_sub(left_current));
    let mid_end = (current_page + right_current + 1).min(last_page + 1);

    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(last_page.saturating_sub(right_edge) + 1);

    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=last_page).map(Some));

    pages
}

/// Authoritative pagination block returned alongside a page of items.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageMeta {
    pub fn new(total: usize, page: usize, per_page: usize) -> Self {
        let page = page.max(1);
        let total_pages = total.div_ceil(per_page.max(1));

        Self {
            total,
            page,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// `{ data, pagination }` response body.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PageEnvelope<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

impl<T> PageEnvelope<T> {
    pub fn new(data: Vec<T>, total: usize, page: usize, per_page: usize) -> Self {
        Self {
            data,
            pagination: PageMeta::new(total, page, per_page),
        }
    }
}
