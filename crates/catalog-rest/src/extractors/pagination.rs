//! Pagination extractor.

use catalog_core::{PageRequest, Sort};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Zero-based page index (default 0)
    #[serde(default)]
    pub page: Option<usize>,
    /// Page size, clamped to 1..=100 (default 20)
    #[serde(default)]
    pub size: Option<usize>,
    /// `property[,asc|desc]` (default `name,asc`)
    #[serde(default)]
    pub sort: Option<String>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        let page = PageRequest::new(
            query.page.unwrap_or(0),
            query.size.unwrap_or(PageRequest::DEFAULT_SIZE),
        );
        match query.sort {
            Some(raw) => page.with_sort(Sort::parse(&raw)),
            None => page,
        }
    }
}
