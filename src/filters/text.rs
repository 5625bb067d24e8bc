//! Free-text search filter.

use super::Filter;
use crate::catalog::Product;

/// Keeps products whose name, description, or any tag contains the term.
///
/// Matching is a case-insensitive substring test. Brand is not searched.
pub struct TextFilter {
    term: String,
}

impl TextFilter {
    /// Creates a new text filter.
    pub fn new(term: impl AsRef<str>) -> Self {
        Self { term: term.as_ref().to_lowercase() }
    }

    fn contains(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.term)
    }
}

impl Filter for TextFilter {
    fn matches(&self, product: &Product) -> bool {
        if self.term.is_empty() {
            return true;
        }

        self.contains(&product.name)
            || self.contains(&product.description)
            || product.tags.iter().any(|tag| self.contains(tag))
    }

    fn description(&self) -> String {
        format!("Text: \"{}\"", self.term)
    }
}
