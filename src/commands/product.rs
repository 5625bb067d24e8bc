//! Product lookup command implementation.

use super::open_source;
use crate::catalog::{CatalogSource, Product};
use crate::config::Config;
use crate::format::Formatter;
use crate::query::find_by_slug;
use anyhow::Result;
use tracing::{info, warn};

/// Looks up products by slug.
pub struct ProductCommand {
    config: Config,
}

impl ProductCommand {
    /// Creates a new product command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Fetches a product by slug and returns formatted output.
    pub async fn execute(&self, slug: &str) -> Result<String> {
        let source = open_source(&self.config)?;
        self.execute_with_source(source.as_ref(), slug).await
    }

    /// Fetches a product from a provided source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &dyn CatalogSource,
        slug: &str,
    ) -> Result<String> {
        info!("Looking up product: {}", slug);

        let products = source.load().await?;
        let product = find_by_slug(&products, slug)?;

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_product(product))
    }

    /// Fetches multiple products by slug.
    pub async fn execute_batch(&self, slugs: &[String]) -> Result<String> {
        let source = open_source(&self.config)?;
        self.execute_batch_with_source(source.as_ref(), slugs).await
    }

    /// Fetches multiple products from a provided source (for testing).
    ///
    /// Unknown slugs are reported on stderr and skipped. The catalog is
    /// loaded once for the whole batch.
    pub async fn execute_batch_with_source(
        &self,
        source: &dyn CatalogSource,
        slugs: &[String],
    ) -> Result<String> {
        let catalog = source.load().await?;
        let mut products: Vec<Product> = Vec::new();

        for slug in slugs {
            info!("Looking up product: {}", slug);

            match find_by_slug(&catalog, slug) {
                Ok(product) => products.push(product.clone()),
                Err(e) => {
                    warn!("{}", e);
                    eprintln!("Skipping unknown product: {}", slug);
                }
            }
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }
}
