//! Catalog query engine: filter, sort, and paginate a product snapshot.
//!
//! The pipeline runs in a fixed order (text filter, facet filters, price
//! range, sort, page slice) and never fails. Bad input is coerced by
//! [`QueryParams`] before it gets here.

pub mod params;
pub mod sort;

use crate::catalog::Product;
use crate::filters::FilterChainBuilder;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use params::{Paging, QueryParams};
pub use sort::SortKey;

/// First page number.
pub const DEFAULT_PAGE: usize = 1;

/// Items per page when none is requested.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Lookup failures surfaced to callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("product not found: {slug}")]
    NotFound { slug: String },
}

/// Normalized filter, sort, and pagination parameters for one query.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySpec {
    /// Case-insensitive substring matched against name, description, tags
    pub term: Option<String>,
    /// Exact category
    pub category: Option<String>,
    /// Exact brand
    pub brand: Option<String>,
    /// Exact capacity
    pub capacity: Option<String>,
    /// Inclusive lower price bound
    pub min_price: Option<f64>,
    /// Inclusive upper price bound
    pub max_price: Option<f64>,
    pub sort_by: SortKey,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            term: None,
            category: None,
            brand: None,
            capacity: None,
            min_price: None,
            max_price: None,
            sort_by: SortKey::default(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Echo of the filters a query actually applied, for UI display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedFilters {
    /// Present (possibly null) only for search queries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_query: Option<Option<String>>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub capacity: Option<String>,
    /// `[min, max]` when either bound was given
    pub price_range: Option<[Option<f64>; 2]>,
    pub sort_by: SortKey,
}

impl AppliedFilters {
    fn from_spec(spec: &QuerySpec, echo_search: bool) -> Self {
        let price_range = (spec.min_price.is_some() || spec.max_price.is_some())
            .then_some([spec.min_price, spec.max_price]);

        Self {
            search_query: echo_search.then(|| spec.term.clone()),
            category: spec.category.clone(),
            brand: spec.brand.clone(),
            capacity: spec.capacity.clone(),
            price_range,
            sort_by: spec.sort_by,
        }
    }
}

/// One page of query results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub items: Vec<Product>,
    /// Matches before pagination
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    /// `ceil(total / page_size)`
    pub page_count: usize,
    pub applied_filters: AppliedFilters,
}

impl QueryResult {
    /// Returns true if this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns true if a later page exists.
    pub fn has_more(&self) -> bool {
        self.page < self.page_count
    }
}

/// Runs a listing query over a snapshot.
pub fn query(products: Vec<Product>, spec: &QuerySpec) -> QueryResult {
    run(products, spec, false)
}

/// Runs a search query; identical to [`query`] but echoes the search term
/// in the applied filters.
pub fn search(products: Vec<Product>, spec: &QuerySpec) -> QueryResult {
    run(products, spec, true)
}

fn run(products: Vec<Product>, spec: &QuerySpec, echo_search: bool) -> QueryResult {
    let filters = FilterChainBuilder::from_spec(spec).build();
    if !filters.is_empty() {
        debug!("Active filters: {}", filters.descriptions().join(", "));
    }

    let mut matched = filters.apply(products);
    spec.sort_by.sort(&mut matched);

    let total = matched.len();
    let page_size = spec.page_size.max(1);
    let page = spec.page.max(1);
    let skip = (page - 1).saturating_mul(page_size);

    let items: Vec<Product> = matched.into_iter().skip(skip).take(page_size).collect();
    debug!("Query matched {} products, returning {} on page {}", total, items.len(), page);

    QueryResult {
        items,
        total,
        page,
        page_size,
        page_count: total.div_ceil(page_size),
        applied_filters: AppliedFilters::from_spec(spec, echo_search),
    }
}

/// Finds a product by exact slug.
pub fn find_by_slug<'a>(products: &'a [Product], slug: &str) -> Result<&'a Product, QueryError> {
    products
        .iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| QueryError::NotFound { slug: slug.to_string() })
}

/// Products related to `slug`: same category, best rated first, itself excluded.
pub fn recommend(
    products: &[Product],
    slug: &str,
    limit: usize,
) -> Result<Vec<Product>, QueryError> {
    let anchor = find_by_slug(products, slug)?;

    let mut related: Vec<Product> = products
        .iter()
        .filter(|p| p.slug != anchor.slug && p.category == anchor.category)
        .cloned()
        .collect();

    SortKey::RatingDesc.sort(&mut related);
    related.truncate(limit);
    Ok(related)
}
