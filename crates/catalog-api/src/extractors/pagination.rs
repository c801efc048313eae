//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use catalog_core::types::pagination::{DEFAULT_LIMIT, PageRequest};

/// `?page=&limit=` on listing endpoints. `per_page` is accepted for `limit`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u64>,
    #[serde(alias = "per_page")]
    pub limit: Option<u64>,
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        PageRequest::new(self.page.unwrap_or(1), self.limit.unwrap_or(DEFAULT_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let page = PaginationParams::default().into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 10);
    }

    #[test]
    fn test_clamped() {
        let page = PaginationParams {
            page: Some(0),
            limit: Some(1_000),
        }
        .into_page_request();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit, 100);
    }
}
