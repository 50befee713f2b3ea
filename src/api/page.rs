//! Pagination envelope
//!
//! List endpoints share the `?page=&limit=` query shape and the
//! `{data, total, page, limit, pages}` response envelope.

use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: u64 = 10;
const MAX_LIMIT: u64 = 100;

/// Common list query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageQuery {
    /// Page number clamped to at least 1
    pub fn page(&self) -> u64 {
        self.page.max(1)
    }

    /// Page size clamped to 1..=100
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_LIMIT)
    }

    /// Number of documents to skip
    pub fn skip(&self) -> u64 {
        (self.page() - 1) * self.limit()
    }
}

/// Paginated list response envelope
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub pages: u64,
}

impl<T> Page<T> {
    /// Build the envelope; `pages` is `ceil(total / limit)`
    pub fn new(data: Vec<T>, total: u64, query: &PageQuery) -> Self {
        let limit = query.limit();
        Self {
            data,
            total,
            page: query.page(),
            limit,
            pages: total.div_ceil(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: u64, limit: u64) -> PageQuery {
        PageQuery { page, limit }
    }

    #[test]
    fn test_skip_is_zero_based() {
        assert_eq!(query(1, 10).skip(), 0);
        assert_eq!(query(2, 10).skip(), 10);
        assert_eq!(query(5, 25).skip(), 100);
    }

    #[test]
    fn test_page_and_limit_are_clamped() {
        assert_eq!(query(0, 10).page(), 1);
        assert_eq!(query(0, 10).skip(), 0);
        assert_eq!(query(1, 0).limit(), 1);
        assert_eq!(query(1, 1000).limit(), 100);
    }

    #[test]
    fn test_pages_is_ceiling_division() {
        let q = query(1, 10);
        assert_eq!(Page::<i32>::new(vec![], 0, &q).pages, 0);
        assert_eq!(Page::<i32>::new(vec![], 1, &q).pages, 1);
        assert_eq!(Page::<i32>::new(vec![], 10, &q).pages, 1);
        assert_eq!(Page::<i32>::new(vec![], 11, &q).pages, 2);
        assert_eq!(Page::<i32>::new(vec![], 95, &q).pages, 10);
    }

    #[test]
    fn test_page_beyond_range_is_just_empty() {
        let q = query(99, 10);
        let page = Page::<i32>::new(vec![], 5, &q);
        assert!(page.data.is_empty());
        assert_eq!(page.page, 99);
        assert_eq!(page.pages, 1);
    }

    #[test]
    fn test_query_defaults() {
        let q = PageQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 10);
    }
}
