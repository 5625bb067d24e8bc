//! Integration tests for the HTTP API, driven through the router without a
//! network listener.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use battery_catalog::catalog::{
    CatalogError, CatalogSource, FileCatalogSource, Product, StaticCatalogSource,
};
use battery_catalog::config::Config;
use battery_catalog::server::{self, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn fixture_path() -> String {
    format!("{}/tests/fixtures/battery.json", env!("CARGO_MANIFEST_DIR"))
}

fn app_with(source: Arc<dyn CatalogSource>) -> Router {
    let config = Config::default();
    server::app(AppState::new(&config, source), &config)
}

fn app() -> Router {
    app_with(Arc::new(FileCatalogSource::new(fixture_path())))
}

/// Source standing in for an unreadable catalog.
struct BrokenSource;

#[async_trait]
impl CatalogSource for BrokenSource {
    async fn load(&self) -> Result<Vec<Product>, CatalogError> {
        Err(CatalogError::Status { url: "http://catalog.invalid".to_string(), status: 502 })
    }

    fn describe(&self) -> String {
        "broken".to_string()
    }
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .header(header::HOST, "shop.example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn slugs(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_root_liveness() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"Server is running!");
}

#[tokio::test]
async fn test_health() {
    let (status, json) = get(app(), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["products"], 6);

    let (status, json) = get(app_with(Arc::new(BrokenSource)), "/api/health").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["status"], "unavailable");
}

#[tokio::test]
async fn test_list_defaults() {
    let (status, json) = get(app(), "/api/batteries").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["success"], true);
    assert_eq!(json["pagination"]["total"], 6);
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["pages"], 1);
    assert_eq!(json["pagination"]["limit"], 10);
    assert_eq!(json["appliedFilters"]["sortBy"], "newest");
    assert!(json["appliedFilters"].get("searchQuery").is_none());
    assert_eq!(json["seo"]["canonicalUrl"], "http://shop.example.com/batteries");
    assert_eq!(slugs(&json)[0], "livguard-it1554tt");
}

#[tokio::test]
async fn test_list_filters_sort_and_paging() {
    let uri = "/api/batteries?category=Car%20Batteries&sortBy=priceAsc&page=1&pageSize=1";
    let (status, json) = get(app(), uri).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(slugs(&json), vec!["exide-mileage-ml38b20l"]);
    assert_eq!(json["pagination"]["total"], 2);
    assert_eq!(json["pagination"]["pages"], 2);
    assert_eq!(json["appliedFilters"]["category"], "Car Batteries");
    assert_eq!(json["appliedFilters"]["sortBy"], "priceAsc");
}

#[tokio::test]
async fn test_list_price_range() {
    let (_, json) = get(app(), "/api/batteries?minPrice=2000&maxPrice=5299&sortBy=priceDesc").await;

    assert_eq!(
        slugs(&json),
        vec!["amaron-car-battery", "exide-mileage-ml38b20l", "exide-smart-charger-12v"]
    );
    assert_eq!(json["appliedFilters"]["priceRange"], serde_json::json!([2000.0, 5299.0]));
}

#[tokio::test]
async fn test_list_malformed_params_are_coerced() {
    let uri = "/api/batteries?minPrice=abc&sortBy=cheapest&page=0&pageSize=-4";
    let (status, json) = get(app(), uri).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["pagination"]["total"], 6);
    assert_eq!(json["pagination"]["page"], 1);
    assert_eq!(json["pagination"]["limit"], 10);
    assert_eq!(json["appliedFilters"]["sortBy"], "newest");
    assert!(json["appliedFilters"]["priceRange"].is_null());
}

#[tokio::test]
async fn test_list_page_size_is_clamped() {
    let (_, json) = get(app(), "/api/batteries?pageSize=5000").await;
    assert_eq!(json["pagination"]["limit"], 100);
}

#[tokio::test]
async fn test_list_honors_search_alias_without_echo() {
    let (_, json) = get(app(), "/api/batteries?search=charger").await;
    assert_eq!(slugs(&json), vec!["exide-smart-charger-12v"]);
    assert!(json["appliedFilters"].get("searchQuery").is_none());
}

#[tokio::test]
async fn test_page_beyond_last() {
    let (status, json) = get(app(), "/api/batteries?page=9&pageSize=4").await;
    assert_eq!(status, StatusCode::OK);

    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["pagination"]["total"], 6);
    assert_eq!(json["pagination"]["pages"], 2);
}

#[tokio::test]
async fn test_search() {
    let (status, json) = get(app(), "/api/search?q=tubular&brand=Livguard").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(slugs(&json), vec!["livguard-it1554tt"]);
    assert_eq!(json["appliedFilters"]["searchQuery"], "tubular");
    assert_eq!(json["appliedFilters"]["brand"], "Livguard");
    assert_eq!(json["seo"]["canonicalUrl"], "http://shop.example.com/search?q=tubular");
}

#[tokio::test]
async fn test_search_without_term() {
    let (_, json) = get(app(), "/api/search").await;

    assert_eq!(json["pagination"]["total"], 6);
    assert!(json["appliedFilters"]["searchQuery"].is_null());
    assert!(json["appliedFilters"].as_object().unwrap().contains_key("searchQuery"));
}

#[tokio::test]
async fn test_search_does_not_match_brand() {
    let (_, json) = get(app(), "/api/search?q=amaron").await;
    assert_eq!(json["pagination"]["total"], 0);
}

#[tokio::test]
async fn test_product_by_slug() {
    let (status, json) = get(app(), "/api/product/amaron-car-battery").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["name"], "Car Battery");
    assert_eq!(json["data"]["warrantyMonths"], 72);
    assert_eq!(json["seo"]["title"], "Car Battery - BatteryHub");
    assert_eq!(
        json["seo"]["structuredData"]["offers"]["availability"],
        "https://schema.org/InStock"
    );
}

#[tokio::test]
async fn test_product_seo_overrides() {
    let (_, json) = get(app(), "/api/product/livguard-it1554tt").await;
    assert_eq!(json["seo"]["title"], "Livguard IT1554TT 150Ah | Best Price");
    assert_eq!(
        json["seo"]["structuredData"]["offers"]["availability"],
        "https://schema.org/OutOfStock"
    );
}

#[tokio::test]
async fn test_product_not_found() {
    let (status, json) = get(app(), "/api/product/no-such-battery").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Battery not found");
}

#[tokio::test]
async fn test_recommended() {
    let (status, json) = get(app(), "/api/products/recommended/luminous-rc18000").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs(&json), vec!["livguard-it1554tt"]);

    let (status, _) = get(app(), "/api/products/recommended/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_facet_routes() {
    let (status, json) = get(app(), "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(
        json["data"],
        serde_json::json!([
            "All Types",
            "Car Batteries",
            "Inverter Batteries",
            "Bike Batteries",
            "Chargers"
        ])
    );

    let (_, json) = get(app(), "/api/brands").await;
    assert_eq!(
        json["data"],
        serde_json::json!(["All Brands", "Amaron", "Exide", "Luminous", "Livguard"])
    );

    let (_, json) = get(app(), "/api/capacities").await;
    assert_eq!(json["data"][0], "All Capacities");
    assert_eq!(json["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_source_failure_is_500() {
    let (status, json) = get(app_with(Arc::new(BrokenSource)), "/api/batteries").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["success"], false);
    assert_eq!(json["message"], "Server error");
}

#[tokio::test]
async fn test_static_source() {
    let products = vec![Product::new("solo", "Solo Battery", "Car Batteries", "Exide", 999.0)];
    let app = app_with(Arc::new(StaticCatalogSource::new(products)));
    let (_, json) = get(app, "/api/batteries").await;
    assert_eq!(slugs(&json), vec!["solo"]);
}

#[tokio::test]
async fn test_irregular_catalog_still_serves() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"slug":"dated","name":"Dated","category":"Car Batteries","brand":"Exide",
              "price":100,"createdAt":"2024-03-02"}},
            {{"slug":"epoch","name":"Epoch","category":"Car Batteries","brand":"Exide",
              "price":200,"createdAt":1709373600000}},
            {{"slug":"garbled","name":"Garbled","category":"Chargers","brand":"Amaron",
              "price":300,"createdAt":"next week"}},
            {{"slug":"dated","name":"Dated Again","category":"Chargers","brand":"Amaron",
              "price":400}}
        ]"#
    )
    .unwrap();

    let app = || app_with(Arc::new(FileCatalogSource::new(file.path())));

    let (status, json) = get(app(), "/api/batteries").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["pagination"]["total"], 3);
    // Newest first; the unreadable date sorts with the undated.
    assert_eq!(slugs(&json), vec!["epoch", "dated", "garbled"]);

    let (status, json) = get(app(), "/api/product/dated").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["name"], "Dated");

    let (status, json) = get(app(), "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!(["All Types", "Car Batteries", "Chargers"]));
}

#[tokio::test]
async fn test_product_slug_is_not_trimmed() {
    let (status, _) = get(app(), "/api/product/%20amaron-car-battery").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
