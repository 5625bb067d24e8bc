//! CLI command implementations.

pub mod facets;
pub mod list;
pub mod product;
pub mod recommend;

pub use facets::FacetsCommand;
pub use list::ListCommand;
pub use product::ProductCommand;
pub use recommend::RecommendCommand;

use crate::catalog::{source, CatalogSource};
use crate::config::Config;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Opens the catalog source named in the config.
pub fn open_source(config: &Config) -> Result<Arc<dyn CatalogSource>> {
    source::from_location(&config.source, config.request_timeout())
        .with_context(|| format!("Failed to open catalog: {}", config.source))
}
