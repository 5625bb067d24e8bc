//! Catalog snapshot sources.
//!
//! Every call to [`CatalogSource::load`] reads a fresh snapshot. Nothing is
//! cached between calls, so edits to the catalog file show up on the next
//! request.

use super::{parse_catalog, CatalogError, Product};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use wreq::Client;

/// Trait for loading the full product collection - enables mocking for tests.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Loads the current full product collection.
    async fn load(&self) -> Result<Vec<Product>, CatalogError>;

    /// Human-readable location of the catalog, for logs.
    fn describe(&self) -> String;
}

/// Builds a source from a path or an `http(s)://` URL.
pub fn from_location(
    location: &str,
    timeout: Duration,
) -> Result<Arc<dyn CatalogSource>, CatalogError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Arc::new(HttpCatalogSource::new(location, timeout)?))
    } else {
        Ok(Arc::new(FileCatalogSource::new(location)))
    }
}

/// Reads the catalog from a JSON file on disk.
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    /// Creates a source for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        let origin = self.path.display().to_string();
        debug!("Reading catalog from {}", origin);

        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Io { path: origin.clone(), source })?;

        let products = parse_catalog(&content, &origin)?;
        debug!("Loaded {} products", products.len());
        Ok(products)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the catalog document over HTTP.
pub struct HttpCatalogSource {
    client: Client,
    url: String,
}

impl HttpCatalogSource {
    /// Creates a source for the given URL.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let url = url.into();
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| CatalogError::Http { url: url.clone(), message: e.to_string() })?;

        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        info!("Fetching catalog: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| CatalogError::Http { url: self.url.clone(), message: e.to_string() })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(CatalogError::Status { url: self.url.clone(), status: status.as_u16() });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CatalogError::Http { url: self.url.clone(), message: e.to_string() })?;

        parse_catalog(&body, &self.url)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Serves a fixed, in-memory collection. Each load hands out a copy.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    products: Vec<Product>,
}

impl StaticCatalogSource {
    /// Creates a source over the given products.
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory catalog ({} products)", self.products.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CATALOG: &str = r#"[
        {"slug":"exide-mileage","name":"Exide Mileage","category":"Car Batteries","brand":"Exide","price":5200},
        {"slug":"luminous-charger","name":"Luminous Charger","category":"Chargers","brand":"Luminous","price":1500}
    ]"#;

    #[tokio::test]
    async fn test_file_source_reads_fresh_snapshot() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CATALOG).unwrap();

        let source = FileCatalogSource::new(file.path());
        let products = source.load().await.unwrap();
        assert_eq!(products.len(), 2);

        // Rewrite the file; the next load must see the change.
        std::fs::write(file.path(), "[]").unwrap();
        let products = source.load().await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let source = FileCatalogSource::new("/nonexistent/battery.json");
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/battery.json"));
    }

    #[tokio::test]
    async fn test_file_source_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let source = FileCatalogSource::new(file.path());
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_http_source_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/battery.json"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CATALOG))
            .mount(&mock_server)
            .await;

        let url = format!("{}/battery.json", mock_server.uri());
        let source = HttpCatalogSource::new(&url, Duration::from_secs(5)).unwrap();

        let products = source.load().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].slug, "exide-mileage");
        assert_eq!(source.describe(), url);
    }

    #[tokio::test]
    async fn test_http_source_error_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/battery.json"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let url = format!("{}/battery.json", mock_server.uri());
        let source = HttpCatalogSource::new(url, Duration::from_secs(5)).unwrap();

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_http_source_bad_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&mock_server)
            .await;

        let source = HttpCatalogSource::new(mock_server.uri(), Duration::from_secs(5)).unwrap();
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticCatalogSource::new(vec![Product::new(
            "a",
            "A",
            "Chargers",
            "Exide",
            10.0,
        )]);
        let products = source.load().await.unwrap();
        assert_eq!(products.len(), 1);
        assert!(source.describe().contains("1 products"));
    }

    #[tokio::test]
    async fn test_from_location_picks_source() {
        let source = from_location("data/battery.json", Duration::from_secs(5)).unwrap();
        assert_eq!(source.describe(), "data/battery.json");

        let source =
            from_location("https://example.com/battery.json", Duration::from_secs(5)).unwrap();
        assert_eq!(source.describe(), "https://example.com/battery.json");
    }
}
