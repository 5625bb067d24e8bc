//! Result ordering.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Sort order for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    RatingDesc,
    #[default]
    Newest,
}

impl SortKey {
    /// Parses a sort key, falling back to `Newest` for anything unrecognized.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim() {
            "priceAsc" => SortKey::PriceAsc,
            "priceDesc" => SortKey::PriceDesc,
            "ratingDesc" => SortKey::RatingDesc,
            _ => SortKey::Newest,
        }
    }

    /// Wire name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "priceAsc",
            SortKey::PriceDesc => "priceDesc",
            SortKey::RatingDesc => "ratingDesc",
            SortKey::Newest => "newest",
        }
    }

    /// Compares two products under this key.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::PriceAsc => a.price.total_cmp(&b.price),
            SortKey::PriceDesc => b.price.total_cmp(&a.price),
            SortKey::RatingDesc => b.rating.total_cmp(&a.rating),
            // Undated products sort after every dated one.
            SortKey::Newest => b.created_at.cmp(&a.created_at),
        }
    }

    /// Sorts in place. Equal keys keep their input order.
    pub fn sort(&self, products: &mut [Product]) {
        products.sort_by(|a, b| self.compare(a, b));
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
