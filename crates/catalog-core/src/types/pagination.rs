//! Page-based listing: `?page=&limit=` in, a counted page out.

use serde::{Deserialize, Serialize};

/// Page size when the query gives none.
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page a client may ask for.
pub const MAX_LIMIT: u64 = 100;

/// A 1-based page of at most `limit` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    /// Clamps `page` to at least 1 and `limit` to `1..=MAX_LIMIT`.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Rows to skip, saturating on absurd page numbers.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of results together with the total row count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    /// Rows across all pages.
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    /// Never zero; an empty listing has one empty page.
    pub total_pages: u64,
    pub has_next: bool,
}

impl<T> PageResponse<T> {
    /// Builds the page for `request` out of `total` matching rows.
    pub fn new(items: Vec<T>, request: &PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.limit.max(1)).max(1);
        Self {
            items,
            total,
            page: request.page,
            limit: request.limit,
            total_pages,
            has_next: request.page < total_pages,
        }
    }

    /// Converts the items, keeping the page counters.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
            has_next: self.has_next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_clamps() {
        let page = PageRequest::new(3, 500);
        assert_eq!(page.limit, MAX_LIMIT);
        assert_eq!(page.offset(), 200);
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, limit: 1 });
        assert_eq!(PageRequest::new(u64::MAX, 100).offset(), u64::MAX);
    }

    #[test]
    fn test_page_counts() {
        let resp = PageResponse::new(vec![1, 2], &PageRequest::new(2, 2), 5);
        assert_eq!(resp.total_pages, 3);
        assert!(resp.has_next);

        let empty: PageResponse<u8> = PageResponse::new(Vec::new(), &PageRequest::default(), 0);
        assert_eq!(empty.total_pages, 1);
        assert!(!empty.has_next);
    }

    #[test]
    fn test_map_keeps_counters() {
        let resp = PageResponse::new(vec![1, 2], &PageRequest::new(1, 2), 3).map(|n| n * 10);
        assert_eq!(resp.items, vec![10, 20]);
        assert_eq!(resp.total, 3);
        assert_eq!(resp.total_pages, 2);
    }
}
