//! Pagination and sorting types for list operations.

use crate::error::CatalogError;
use crate::result::CatalogResult;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Requested ordering: a property name as exposed in the API plus a direction.
///
/// The property is not trusted; repositories resolve it against their own
/// whitelist of sortable columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub property: String,
    pub direction: SortDirection,
}

impl Sort {
    /// Property used when the caller asks for no particular order.
    pub const DEFAULT_PROPERTY: &'static str = "name";

    #[must_use]
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Parses `property[,asc|desc]`. Blank input yields the default sort and
    /// an unrecognized direction falls back to ascending.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(',').map(str::trim);
        let property = match parts.next() {
            Some(p) if !p.is_empty() => p,
            _ => return Self::default(),
        };
        let direction = match parts.next() {
            Some(d) if d.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        Self {
            property: property.to_string(),
            direction,
        }
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::asc(Self::DEFAULT_PROPERTY)
    }
}

impl Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{},{}", self.property, dir)
    }
}

/// A request for a page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
    /// Requested ordering.
    pub sort: Sort,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_SIZE: usize = 20;
    /// The maximum allowed page size.
    pub const MAX_SIZE: usize = 100;

    /// Creates a new page request sorted by the default property.
    #[must_use]
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, Self::MAX_SIZE),
            sort: Sort::default(),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(0, Self::DEFAULT_SIZE)
    }

    /// Replaces the sort order.
    #[must_use]
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    /// Returns the row offset for database queries.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `page * size` does not fit a signed
    /// 64-bit SQL offset.
    pub fn offset(&self) -> CatalogResult<i64> {
        self.page
            .checked_mul(self.size)
            .and_then(|offset| i64::try_from(offset).ok())
            .ok_or_else(|| CatalogError::validation(format!("Page number is too large: {}", self.page)))
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> usize {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The items on this page.
    pub content: Vec<T>,
    /// The current page number (0-indexed).
    pub page: usize,
    /// The number of items per page.
    pub size: usize,
    /// The total number of items across all pages.
    pub total_elements: u64,
    /// The total number of pages.
    pub total_pages: u64,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page.
    pub last: bool,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(content: Vec<T>, page: usize, size: usize, total_elements: u64) -> Self {
        let total_pages = if size > 0 {
            total_elements.div_ceil(size as u64)
        } else {
            0
        };

        Self {
            content,
            page,
            size,
            total_elements,
            total_pages,
            first: page == 0,
            last: page as u64 >= total_pages.saturating_sub(1),
        }
    }

    /// Maps the page content to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        !self.last
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.content.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request() {
        let req = PageRequest::new(2, 10);
        assert_eq!(req.offset().unwrap(), 20);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.sort, Sort::asc("name"));
    }

    #[test]
    fn test_offset_out_of_range_is_rejected() {
        let overflowing = PageRequest::new(usize::MAX, 20).offset().unwrap_err();
        assert_eq!(overflowing.status_code(), 400);
        assert_eq!(
            overflowing.to_string(),
            format!("Page number is too large: {}", usize::MAX)
        );

        let past_i64 = PageRequest::new(1 << 63, 1).offset().unwrap_err();
        assert!(matches!(past_i64, CatalogError::Validation { .. }));

        let largest = PageRequest::new(i64::MAX as usize, 1);
        assert_eq!(largest.offset().unwrap(), i64::MAX);
    }

    #[test]
    fn test_page_request_size_is_clamped() {
        assert_eq!(PageRequest::new(0, 1000).size, PageRequest::MAX_SIZE);
        assert_eq!(PageRequest::new(0, 0).size, 1);
    }

    #[test]
    fn test_page_request_default() {
        let req = PageRequest::default();
        assert_eq!(req.page, 0);
        assert_eq!(req.size, 20);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!(Sort::parse("name"), Sort::asc("name"));
        assert_eq!(Sort::parse("durationSeconds,desc"), Sort::desc("durationSeconds"));
        assert_eq!(Sort::parse("email, DESC"), Sort::desc("email"));
        assert_eq!(Sort::parse("email,sideways"), Sort::asc("email"));
        assert_eq!(Sort::parse(""), Sort::default());
        assert_eq!(Sort::parse(" ,desc"), Sort::default());
    }

    #[test]
    fn test_sort_display() {
        assert_eq!(Sort::desc("genre").to_string(), "genre,desc");
    }

    #[test]
    fn test_page_info() {
        let page: Page<i32> = Page::new(vec![1, 2, 3], 0, 10, 25);
        assert!(page.first);
        assert!(!page.last);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
    }

    #[test]
    fn test_page_last_page() {
        let page: Page<i32> = Page::new(vec![1, 2], 2, 10, 22);
        assert!(!page.first);
        assert!(page.last);
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_without_results() {
        let page: Page<i32> = Page::new(Vec::new(), 0, 10, 0);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(page.first);
        assert!(page.last);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 0, 10, 3);
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.content, vec![2, 4, 6]);
        assert_eq!(mapped.total_elements, 3);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let json = serde_json::to_value(Page::new(vec![1], 0, 20, 1)).unwrap();
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["first"], true);
    }
}
