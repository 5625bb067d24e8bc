//! Exact-match facet filter.

use super::Filter;
use crate::catalog::Product;
use crate::facets::Facet;

/// Keeps products whose facet value equals the given value exactly.
///
/// Comparison is case-sensitive: the value must match the stored facet
/// verbatim, as it appears in the facet lists.
pub struct FacetFilter {
    facet: Facet,
    value: String,
}

impl FacetFilter {
    /// Creates a new facet filter.
    pub fn new(facet: Facet, value: impl Into<String>) -> Self {
        Self { facet, value: value.into() }
    }

    /// Filter on category.
    pub fn category(value: impl Into<String>) -> Self {
        Self::new(Facet::Category, value)
    }

    /// Filter on brand.
    pub fn brand(value: impl Into<String>) -> Self {
        Self::new(Facet::Brand, value)
    }

    /// Filter on capacity.
    pub fn capacity(value: impl Into<String>) -> Self {
        Self::new(Facet::Capacity, value)
    }
}

impl Filter for FacetFilter {
    fn matches(&self, product: &Product) -> bool {
        self.facet.value_of(product) == self.value
    }

    fn description(&self) -> String {
        format!("{}: {}", self.facet, self.value)
    }
}
