//! Facet fields and distinct-value enumeration for filter UIs.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// A filterable product attribute with data-derived values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facet {
    Category,
    Brand,
    Capacity,
}

impl Facet {
    /// Returns this facet's value on a product.
    pub fn value_of<'a>(&self, product: &'a Product) -> &'a str {
        match self {
            Facet::Category => &product.category,
            Facet::Brand => &product.brand,
            Facet::Capacity => &product.capacity,
        }
    }

    /// Synthetic "match everything" entry shown first in filter lists.
    pub fn sentinel(&self) -> &'static str {
        match self {
            Facet::Category => "All Types",
            Facet::Brand => "All Brands",
            Facet::Capacity => "All Capacities",
        }
    }

    /// Returns all facets.
    pub fn all() -> &'static [Facet] {
        &[Facet::Category, Facet::Brand, Facet::Capacity]
    }
}

impl FromStr for Facet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "category" | "categories" | "type" => Ok(Facet::Category),
            "brand" | "brands" => Ok(Facet::Brand),
            "capacity" | "capacities" => Ok(Facet::Capacity),
            _ => Err(format!("Unknown facet: {}. Use: category, brand, capacity", s)),
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Category => write!(f, "category"),
            Facet::Brand => write!(f, "brand"),
            Facet::Capacity => write!(f, "capacity"),
        }
    }
}

/// Distinct values of `facet`, in first-seen order, headed by its sentinel.
///
/// Distinctness is exact string equality: "Amaron" and "amaron" are two values.
pub fn distinct_values(products: &[Product], facet: Facet) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut values = vec![facet.sentinel().to_string()];

    for product in products {
        let value = facet.value_of(product);
        if seen.insert(value) {
            values.push(value.to_string());
        }
    }

    values
}
