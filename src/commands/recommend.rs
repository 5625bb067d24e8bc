//! Related-product command implementation.

use super::open_source;
use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::format::Formatter;
use crate::query::recommend;
use anyhow::Result;
use tracing::info;

/// Lists products related to a given slug.
pub struct RecommendCommand {
    config: Config,
}

impl RecommendCommand {
    /// Creates a new recommend command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the configured catalog and returns formatted recommendations.
    pub async fn execute(&self, slug: &str) -> Result<String> {
        let source = open_source(&self.config)?;
        self.execute_with_source(source.as_ref(), slug).await
    }

    /// Recommends from a provided source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &dyn CatalogSource,
        slug: &str,
    ) -> Result<String> {
        let products = source.load().await?;
        let related = recommend(&products, slug, self.config.recommendation_limit)?;
        info!("Found {} products related to {}", related.len(), slug);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&related))
    }
}
