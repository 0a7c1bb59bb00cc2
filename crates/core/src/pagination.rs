//! Page-number pagination for list endpoints.

use serde::Serialize;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size for the movie list.
pub const MOVIES_PAGE_SIZE: i64 = 5;

/// Default page size for the comment list.
pub const COMMENTS_PAGE_SIZE: i64 = 10;

/// Clamp a user-provided limit to `[1, max]`, using `default` when absent.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided page number to at least 1.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// A normalized `?page=&page_size=` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    pub fn new(page: Option<i64>, page_size: Option<i64>, default_size: i64) -> Self {
        Self {
            page: clamp_page(page),
            page_size: clamp_limit(page_size, default_size, MAX_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub page: i64,
    pub page_size: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(request: PageRequest, count: i64, results: Vec<T>) -> Self {
        Self {
            count,
            page: request.page,
            page_size: request.page_size,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamp_limit ---------------------------------------------------------

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 5, 100), 5);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(500), 5, 100), 100);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 5, 100), 1);
        assert_eq!(clamp_limit(Some(-3), 5, 100), 1);
    }

    // -- PageRequest ---------------------------------------------------------

    #[test]
    fn first_page_starts_at_zero() {
        let req = PageRequest::new(None, None, MOVIES_PAGE_SIZE);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit(), 5);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn later_pages_skip_previous_rows() {
        let req = PageRequest::new(Some(3), Some(10), COMMENTS_PAGE_SIZE);
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn non_positive_page_becomes_first_page() {
        let req = PageRequest::new(Some(-2), None, COMMENTS_PAGE_SIZE);
        assert_eq!(req.page, 1);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let req = PageRequest::new(Some(i64::MAX), Some(MAX_PAGE_SIZE), MOVIES_PAGE_SIZE);
        assert_eq!(req.offset(), i64::MAX);
    }
}
