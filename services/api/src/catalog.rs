//! Catalog query service
//!
//! Translates filter/sort/pagination request parameters into a bounded page
//! of catalog items plus facet metadata. The catalog is small (tens of rows
//! per variant), so the repository hands over the whole variant and this
//! module does the work in a single pass over the in-memory list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::models::catalog::CatalogItem;

/// Default page size
const DEFAULT_PAGE_SIZE: usize = 12;

/// Upper bound on the page size a client may request
const MAX_PAGE_SIZE: usize = 100;

/// Raw query-string parameters of a catalog request
///
/// Everything arrives as an optional string, like the original URL search
/// params; unparseable numbers fall back to their defaults instead of
/// failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub category: Option<String>,
    pub condition: Option<String>,
    pub major: Option<String>,
    pub degree: Option<String>,
    pub year: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

/// AND-combined filter over one catalog variant
///
/// Comma-separated `category`/`condition` values become match-any sets;
/// `major` and `degree` are exact; `year` is an exact numeric match.
#[derive(Debug, Default)]
pub struct CatalogFilter {
    categories: Option<Vec<String>>,
    conditions: Option<Vec<String>>,
    major: Option<String>,
    degree: Option<String>,
    year: Option<i32>,
}

impl CatalogFilter {
    /// Build a filter from the raw query parameters
    pub fn from_query(query: &ProductQuery) -> Self {
        Self {
            categories: split_values(query.category.as_deref()),
            conditions: split_values(query.condition.as_deref()),
            major: query.major.clone().filter(|v| !v.is_empty()),
            degree: query.degree.clone().filter(|v| !v.is_empty()),
            year: query.year.as_deref().and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Whether an item passes every configured predicate
    pub fn matches(&self, item: &CatalogItem) -> bool {
        if let Some(categories) = &self.categories {
            match &item.category {
                Some(category) if categories.contains(category) => {}
                _ => return false,
            }
        }

        if let Some(conditions) = &self.conditions {
            match &item.condition {
                Some(condition) if conditions.contains(condition) => {}
                _ => return false,
            }
        }

        if let Some(major) = &self.major {
            if item.major.as_ref() != Some(major) {
                return false;
            }
        }

        if let Some(degree) = &self.degree {
            if item.degree.as_ref() != Some(degree) {
                return false;
            }
        }

        if let Some(year) = self.year {
            if item.year != Some(year) {
                return false;
            }
        }

        true
    }
}

fn split_values(param: Option<&str>) -> Option<Vec<String>> {
    let param = param?;
    if param.is_empty() {
        return None;
    }
    Some(param.split(',').map(|v| v.to_string()).collect())
}

/// Sort order for catalog pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    TitleAsc,
    TitleDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Parse the `sortBy` parameter; any unrecognized value falls back to
    /// title ascending
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("title-desc") => Self::TitleDesc,
            Some("price") => Self::PriceAsc,
            Some("price-desc") => Self::PriceDesc,
            _ => Self::TitleAsc,
        }
    }

    /// Sort items in place; ties keep their stored order
    pub fn apply(&self, items: &mut [CatalogItem]) {
        match self {
            Self::TitleAsc => items.sort_by(|a, b| a.title.cmp(&b.title)),
            Self::TitleDesc => items.sort_by(|a, b| b.title.cmp(&a.title)),
            Self::PriceAsc => items.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
        }
    }
}

/// Pagination metadata derived from the filtered set size
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
}

/// Distinct facet values over the entire unfiltered variant
///
/// Deliberately not scoped to the current filter, so the UI can always show
/// every possible option.
#[derive(Debug, Serialize)]
pub struct FilterData {
    pub categories: Vec<String>,
    pub majors: Vec<String>,
    pub years: Vec<i32>,
}

/// One page of catalog results plus its metadata
#[derive(Debug, Serialize)]
pub struct CatalogPage {
    pub products: Vec<CatalogItem>,
    pub pagination: PaginationInfo,
    pub filters: FilterData,
}

/// Resolve page number and page size from the raw parameters
pub fn pagination_params(query: &ProductQuery) -> (usize, usize) {
    let page = query
        .page
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(1)
        .max(1);

    let limit = query
        .limit
        .as_deref()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    (page, limit)
}

/// Collect the distinct category/major/year facets of a variant
pub fn facet_data(items: &[CatalogItem]) -> FilterData {
    let categories: BTreeSet<String> = items.iter().filter_map(|i| i.category.clone()).collect();
    let majors: BTreeSet<String> = items.iter().filter_map(|i| i.major.clone()).collect();
    let years: BTreeSet<i32> = items.iter().filter_map(|i| i.year).collect();

    FilterData {
        categories: categories.into_iter().collect(),
        majors: majors.into_iter().collect(),
        years: years.into_iter().collect(),
    }
}

/// Run a full catalog query: facets, filter, sort, paginate
pub fn run_query(items: Vec<CatalogItem>, query: &ProductQuery) -> CatalogPage {
    let filters = facet_data(&items);

    let filter = CatalogFilter::from_query(query);
    let mut matching: Vec<CatalogItem> = items.into_iter().filter(|i| filter.matches(i)).collect();

    SortKey::from_param(query.sort_by.as_deref()).apply(&mut matching);

    let (page, limit) = pagination_params(query);
    let total_items = matching.len();
    let total_pages = total_items.div_ceil(limit);

    let products: Vec<CatalogItem> = matching
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();

    CatalogPage {
        products,
        pagination: PaginationInfo {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
        },
        filters,
    }
}
