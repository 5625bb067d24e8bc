//! Product catalog: data model, snapshot loading, and load errors.

pub mod models;
pub mod source;

pub use models::Product;
pub use source::{CatalogSource, FileCatalogSource, HttpCatalogSource, StaticCatalogSource};

use std::collections::HashSet;
use thiserror::Error;
use tracing::warn;

/// Failure to produce a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to fetch catalog {url}: {message}")]
    Http { url: String, message: String },

    #[error("catalog request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Parses a catalog document (a JSON array of products).
///
/// When two products share a slug, the first one is kept.
pub fn parse_catalog(json: &str, origin: &str) -> Result<Vec<Product>, CatalogError> {
    let products: Vec<Product> = serde_json::from_str(json)
        .map_err(|source| CatalogError::Parse { origin: origin.to_string(), source })?;

    Ok(dedupe_slugs(products, origin))
}

fn dedupe_slugs(mut products: Vec<Product>, origin: &str) -> Vec<Product> {
    let mut seen = HashSet::with_capacity(products.len());
    products.retain(|product| {
        let first = seen.insert(product.slug.clone());
        if !first {
            warn!("Skipping duplicate slug {} in catalog {}", product.slug, origin);
        }
        first
    });
    products
}
