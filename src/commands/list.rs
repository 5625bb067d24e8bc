//! Listing and search command implementation.

use super::open_source;
use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::format::Formatter;
use crate::query::{self, QueryParams};
use anyhow::Result;
use tracing::info;

/// Runs a filtered, sorted, paginated catalog query.
pub struct ListCommand {
    config: Config,
}

impl ListCommand {
    /// Creates a new list command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Loads the configured catalog and returns one formatted page.
    pub async fn execute(&self, params: &QueryParams) -> Result<String> {
        let source = open_source(&self.config)?;
        self.execute_with_source(source.as_ref(), params).await
    }

    /// Runs the query against a provided source (for testing).
    pub async fn execute_with_source(
        &self,
        source: &dyn CatalogSource,
        params: &QueryParams,
    ) -> Result<String> {
        let spec = params.to_spec_with(&self.config.paging());
        let products = source.load().await?;

        let result = if spec.term.is_some() {
            query::search(products, &spec)
        } else {
            query::query(products, &spec)
        };

        info!("Found {} products matching criteria", result.total);

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_page(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{config, source};
    use crate::config::OutputFormat;

    fn params() -> QueryParams {
        QueryParams::default()
    }

    #[tokio::test]
    async fn test_list_all() {
        let cmd = ListCommand::new(config(OutputFormat::Table));
        let output = cmd.execute_with_source(&source(), &params()).await.unwrap();

        assert!(output.contains("amaron-din44"));
        assert!(output.contains("Page 1 of 1 (4 matching products)"));
    }

    #[tokio::test]
    async fn test_list_with_filters_and_sort() {
        let cmd = ListCommand::new(config(OutputFormat::Json));
        let params = QueryParams {
            brand: Some("Exide".to_string()),
            sort_by: Some("priceAsc".to_string()),
            ..params()
        };

        let output = cmd.execute_with_source(&source(), &params).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["total"], 2);
        assert_eq!(json["items"][0]["slug"], "exide-charger");
        assert_eq!(json["items"][1]["slug"], "exide-mileage");
        assert_eq!(json["appliedFilters"]["brand"], "Exide");
        assert_eq!(json["appliedFilters"]["sortBy"], "priceAsc");
    }

    #[tokio::test]
    async fn test_list_term_echoes_search() {
        let cmd = ListCommand::new(config(OutputFormat::Json));
        let params = QueryParams { term: Some("CHARGER".to_string()), ..params() };

        let output = cmd.execute_with_source(&source(), &params).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["total"], 1);
        assert_eq!(json["appliedFilters"]["searchQuery"], "CHARGER");
    }

    #[tokio::test]
    async fn test_list_coerces_bad_input() {
        let cmd = ListCommand::new(config(OutputFormat::Json));
        let params = QueryParams {
            min_price: Some("cheap".to_string()),
            sort_by: Some("bogus".to_string()),
            page: Some("-3".to_string()),
            page_size: Some("abc".to_string()),
            ..params()
        };

        let output = cmd.execute_with_source(&source(), &params).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["total"], 4);
        assert_eq!(json["page"], 1);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["appliedFilters"]["sortBy"], "newest");
        assert!(json["appliedFilters"]["priceRange"].is_null());
    }

    #[tokio::test]
    async fn test_list_page_past_end() {
        let cmd = ListCommand::new(config(OutputFormat::Table));
        let params = QueryParams {
            page: Some("3".to_string()),
            page_size: Some("2".to_string()),
            ..params()
        };

        let output = cmd.execute_with_source(&source(), &params).await.unwrap();
        assert!(output.contains("No products found."));
        assert!(output.contains("Page 3 of 2 (4 matching products)"));
    }

    #[tokio::test]
    async fn test_list_missing_catalog_file() {
        let mut cfg = config(OutputFormat::Table);
        cfg.source = "/nonexistent/battery.json".to_string();

        let cmd = ListCommand::new(cfg);
        let result = cmd.execute(&params()).await;
        assert!(result.is_err());
    }
}
