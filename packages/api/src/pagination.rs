// ABOUTME: Page selection shared by the HTML overviews and the JSON listings
// ABOUTME: A requested page is resolved strictly (404 past the end) or clamped (empty page past the end)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// First page number (pages are 1-indexed)
pub const FIRST_PAGE: i64 = 1;

/// Toppings shown per page on the topping overview
pub const TOPPINGS_PER_PAGE: i64 = 10;

/// Pizzas shown per page on the pizza overview
pub const PIZZAS_PER_PAGE: i64 = 5;

/// Default page size for the JSON listings
pub const DEFAULT_API_LIMIT: i64 = 20;

/// Largest page size a JSON listing will return
pub const MAX_API_LIMIT: i64 = 100;

/// Query string accepted by the HTML overviews: `?page=3` or `?page=last`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Query string accepted by the JSON listings: `?page=&limit=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Same values as the overviews; anything unusable means the first page
    pub page: Option<String>,

    /// Items per page, clamped to 1..=MAX_API_LIMIT
    pub limit: Option<i64>,
}

impl ListQuery {
    /// Page size after clamping the requested limit
    pub fn page_size(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_API_LIMIT)
            .clamp(1, MAX_API_LIMIT)
    }

    /// Requested page, falling back to the first page instead of failing
    pub fn page_request(&self) -> PageRequest {
        PageRequest::parse(self.page.as_deref()).unwrap_or(PageRequest::Number(FIRST_PAGE))
    }
}

/// Why an overview page could not be selected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("invalid page number: {0}")]
    Invalid(String),

    #[error("page {0} is out of range")]
    OutOfRange(i64),
}

/// A page asked for by number or as the last one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Number(i64),
    Last,
}

impl PageRequest {
    /// Parse the raw `page` query value. Absent means the first page.
    pub fn parse(raw: Option<&str>) -> Result<Self, PageError> {
        let Some(raw) = raw else {
            return Ok(PageRequest::Number(FIRST_PAGE));
        };

        if raw == "last" {
            return Ok(PageRequest::Last);
        }

        match raw.parse::<i64>() {
            Ok(number) if number >= FIRST_PAGE => Ok(PageRequest::Number(number)),
            _ => Err(PageError::Invalid(raw.to_string())),
        }
    }

    /// Resolve for an HTML overview. A page past the end is an error, except
    /// that an empty listing still has its (empty) first page.
    pub fn resolve(self, total_items: i64, page_size: i64) -> Result<PaginationMeta, PageError> {
        let meta = self.resolve_clamped(total_items, page_size);

        if meta.page > meta.total_pages {
            return Err(PageError::OutOfRange(meta.page));
        }

        Ok(meta)
    }

    /// Resolve for a JSON listing. A page past the end is kept and simply holds no items.
    pub fn resolve_clamped(self, total_items: i64, page_size: i64) -> PaginationMeta {
        let total_pages = page_count(total_items, page_size);

        let page = match self {
            PageRequest::Number(number) => number.max(FIRST_PAGE),
            PageRequest::Last => total_pages,
        };

        PaginationMeta {
            page,
            page_size,
            total_items,
            total_pages,
            has_next_page: page < total_pages,
            has_previous_page: page > FIRST_PAGE,
        }
    }
}

/// Number of pages needed for the listing; never fewer than one
fn page_count(total_items: i64, page_size: i64) -> i64 {
    let page_size = page_size.max(1);
    let total_items = total_items.max(0);

    (total_items / page_size + i64::from(total_items % page_size != 0)).max(FIRST_PAGE)
}

/// Where a resolved page sits in its listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    pub page: i64,

    /// Items per page
    #[serde(rename = "pageSize")]
    pub page_size: i64,

    /// Total number of items across all pages
    #[serde(rename = "totalItems")]
    pub total_items: i64,

    /// Total number of pages
    #[serde(rename = "totalPages")]
    pub total_pages: i64,

    /// Whether there is a next page
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,

    /// Whether there is a previous page
    #[serde(rename = "hasPreviousPage")]
    pub has_previous_page: bool,
}

impl PaginationMeta {
    /// SQL OFFSET of the page's first item. Saturates for absurd page numbers,
    /// which then select nothing.
    pub fn offset(&self) -> i64 {
        (self.page - FIRST_PAGE).saturating_mul(self.page_size)
    }
}

/// One page of a JSON listing
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    /// The items on this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self { data, pagination }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_request() {
        assert_eq!(PageRequest::parse(None), Ok(PageRequest::Number(1)));
        assert_eq!(PageRequest::parse(Some("3")), Ok(PageRequest::Number(3)));
        assert_eq!(PageRequest::parse(Some("last")), Ok(PageRequest::Last));

        for raw in ["0", "-1", "abc", "", "LAST", "1.5"] {
            assert!(
                PageRequest::parse(Some(raw)).is_err(),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_resolve_page_within_range() {
        let meta = PageRequest::Number(2).resolve(12, TOPPINGS_PER_PAGE).unwrap();

        assert_eq!(meta.page, 2);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.offset(), 10);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn test_resolve_last_page() {
        let meta = PageRequest::Last.resolve(11, PIZZAS_PER_PAGE).unwrap();
        assert_eq!(meta.page, 3);
        assert_eq!(meta.offset(), 10);
    }

    #[test]
    fn test_resolve_empty_list_allows_first_page_only() {
        let meta = PageRequest::Number(1).resolve(0, TOPPINGS_PER_PAGE).unwrap();
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next_page);

        let last = PageRequest::Last.resolve(0, TOPPINGS_PER_PAGE).unwrap();
        assert_eq!(last.page, 1);

        assert_eq!(
            PageRequest::Number(2).resolve(0, TOPPINGS_PER_PAGE),
            Err(PageError::OutOfRange(2))
        );
    }

    #[test]
    fn test_resolve_past_the_end() {
        assert_eq!(
            PageRequest::Number(3).resolve(20, TOPPINGS_PER_PAGE),
            Err(PageError::OutOfRange(3))
        );
        assert_eq!(
            PageRequest::Number(i64::MAX).resolve(20, TOPPINGS_PER_PAGE),
            Err(PageError::OutOfRange(i64::MAX))
        );
    }

    #[test]
    fn test_clamped_page_past_the_end() {
        let meta = PageRequest::Number(4).resolve_clamped(3, 2);

        assert_eq!(meta.page, 4);
        assert_eq!(meta.total_pages, 2);
        assert_eq!(meta.offset(), 6);
        assert!(!meta.has_next_page);
        assert!(meta.has_previous_page);
    }

    #[test]
    fn test_huge_page_offset_saturates() {
        let meta = PageRequest::Number(i64::MAX).resolve_clamped(3, MAX_API_LIMIT);
        assert_eq!(meta.offset(), i64::MAX);
    }

    #[test]
    fn test_list_query_defaults_and_clamping() {
        let query = ListQuery::default();
        assert_eq!(query.page_size(), DEFAULT_API_LIMIT);
        assert_eq!(query.page_request(), PageRequest::Number(1));

        let query = ListQuery {
            page: Some("-5".to_string()),
            limit: Some(1000),
        };
        assert_eq!(query.page_size(), MAX_API_LIMIT);
        assert_eq!(query.page_request(), PageRequest::Number(1));

        let query = ListQuery {
            page: Some("last".to_string()),
            limit: Some(-5),
        };
        assert_eq!(query.page_size(), 1);
        assert_eq!(query.page_request(), PageRequest::Last);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 1);
        assert_eq!(page_count(10, 10), 1);
        assert_eq!(page_count(11, 10), 2);
        assert_eq!(page_count(100, 20), 5);
    }
}
