//! Facet listing command implementation.

use super::open_source;
use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::facets::{distinct_values, Facet};
use crate::format::Formatter;
use anyhow::Result;
use tracing::info;

/// Lists the distinct values of a facet.
pub struct FacetsCommand {
    config: Config,
}

impl FacetsCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self, facet: Facet) -> Result<String> {
        let source = open_source(&self.config)?;
        self.execute_with_source(source.as_ref(), facet).await
    }

    pub async fn execute_with_source(
        &self,
        source: &dyn CatalogSource,
        facet: Facet,
    ) -> Result<String> {
        let products = source.load().await?;
        let values = distinct_values(&products, facet);
        info!("Found {} distinct {} values", values.len() - 1, facet);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_facets(facet, &values))
    }
}
