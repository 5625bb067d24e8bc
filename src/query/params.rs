//! Raw query parameters and their lenient coercion into a [`QuerySpec`].
//!
//! Malformed values are never rejected. Unparseable price bounds are
//! dropped, unknown sort keys become `newest`, and non-positive or
//! non-numeric paging values fall back to their defaults.

use super::sort::SortKey;
use super::{QuerySpec, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use std::collections::HashMap;

/// Upper bound applied to `pageSize` unless configured otherwise.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 100;

/// Page size defaults and limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    /// Used when `pageSize` is absent or invalid
    pub default_page_size: usize,
    /// Larger requested sizes are clamped to this
    pub max_page_size: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self { default_page_size: DEFAULT_PAGE_SIZE, max_page_size: DEFAULT_MAX_PAGE_SIZE }
    }
}

/// Query parameters as received, before coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub term: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub capacity: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl QueryParams {
    /// Picks recognized keys out of a parameter map. Unknown keys are ignored.
    ///
    /// `q` and `search` are accepted for `term`, and `limit` for `pageSize`.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |keys: &[&str]| keys.iter().find_map(|k| map.get(*k).cloned());

        Self {
            term: get(&["term", "q", "search"]),
            category: get(&["category"]),
            brand: get(&["brand"]),
            capacity: get(&["capacity"]),
            min_price: get(&["minPrice"]),
            max_price: get(&["maxPrice"]),
            sort_by: get(&["sortBy"]),
            page: get(&["page"]),
            page_size: get(&["pageSize", "limit"]),
        }
    }

    /// Coerces into a spec using default paging limits.
    pub fn to_spec(&self) -> QuerySpec {
        self.to_spec_with(&Paging::default())
    }

    /// Coerces into a spec.
    pub fn to_spec_with(&self, paging: &Paging) -> QuerySpec {
        let page_size = parse_positive(self.page_size.as_deref())
            .unwrap_or(paging.default_page_size)
            .min(paging.max_page_size)
            .max(1);

        QuerySpec {
            term: non_empty(self.term.as_deref()),
            category: non_empty(self.category.as_deref()),
            brand: non_empty(self.brand.as_deref()),
            capacity: non_empty(self.capacity.as_deref()),
            min_price: parse_price(self.min_price.as_deref()),
            max_price: parse_price(self.max_price.as_deref()),
            sort_by: self.sort_by.as_deref().map(SortKey::parse_lenient).unwrap_or_default(),
            page: parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            page_size,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn parse_price(value: Option<&str>) -> Option<f64> {
    value?.trim().parse::<f64>().ok().filter(|p| !p.is_nan())
}

fn parse_positive(value: Option<&str>) -> Option<usize> {
    value?.trim().parse::<usize>().ok().filter(|n| *n > 0)
}
