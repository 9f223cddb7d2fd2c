//! Pagination types.
//!
//! Offset pagination with the page/limit/total contract every list endpoint
//! shares: `pages = ceil(total / limit)`, `hasNext = page < pages`,
//! `hasPrev = page > 1`.

use serde::{Deserialize, Serialize};

/// A page of results plus paging metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,

    /// 1-based page number.
    pub page: u32,

    /// Page size.
    pub limit: u32,

    /// Total matching items across all pages.
    pub total: u64,

    /// Total page count (`ceil(total / limit)`, 0 when `total` is 0).
    pub pages: u64,

    /// Whether a later page exists.
    pub has_next: bool,

    /// Whether an earlier page exists.
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// An empty first page.
    pub fn empty(limit: u32) -> Self {
        paginate(Vec::new(), 1, limit, 0)
    }

    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Maps the items to a different type, keeping the metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            pages: self.pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

/// Wraps a result slice with paging metadata.
///
/// `page` and `limit` are coerced to at least 1; validating user input is the
/// caller's job, this only guards the arithmetic. Pure — no I/O.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32, total: u64) -> Page<T> {
    let page = page.max(1);
    let limit = limit.max(1);
    let pages = total.div_ceil(limit as u64);

    Page {
        items,
        page,
        limit,
        total,
        pages,
        has_next: (page as u64) < pages,
        has_prev: page > 1,
    }
}
