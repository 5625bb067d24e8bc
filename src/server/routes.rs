//! Catalog API routes.
//!
//! Response bodies keep the storefront's envelope: `success`, `data`, and,
//! for listings, `pagination`, `appliedFilters`, and `seo`.

use super::error::ApiResult;
use super::AppState;
use crate::catalog::Product;
use crate::facets::{distinct_values, Facet};
use crate::query::{self, find_by_slug, recommend, AppliedFilters, QueryParams, QueryResult};
use crate::seo::SeoMeta;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, warn};

/// Create the catalog API router (mounted under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/batteries", get(list_batteries))
        .route("/search", get(search_batteries))
        .route("/product/{slug}", get(get_battery))
        .route("/products/recommended/{slug}", get(recommended))
        .route("/categories", get(categories))
        .route("/brands", get(brands))
        .route("/capacities", get(capacities))
}

// -------------------------------------------------------------------------
// Response types
// -------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct Pagination {
    total: usize,
    page: usize,
    pages: usize,
    limit: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    success: bool,
    data: Vec<Product>,
    pagination: Pagination,
    applied_filters: AppliedFilters,
    seo: SeoMeta,
}

impl PageResponse {
    fn new(result: QueryResult, seo: SeoMeta) -> Self {
        Self {
            success: true,
            pagination: Pagination {
                total: result.total,
                page: result.page,
                pages: result.page_count,
                limit: result.page_size,
            },
            data: result.items,
            applied_filters: result.applied_filters,
            seo,
        }
    }
}

#[derive(Debug, Serialize)]
struct ProductResponse {
    success: bool,
    data: Product,
    seo: SeoMeta,
}

#[derive(Debug, Serialize)]
struct DataResponse<T> {
    success: bool,
    data: T,
}

impl<T> DataResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data })
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    products: Option<usize>,
}

// -------------------------------------------------------------------------
// Handlers
// -------------------------------------------------------------------------

/// Liveness text served at `/`.
pub async fn root() -> &'static str {
    "Server is running!"
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.source.load().await {
        Ok(products) => {
            (StatusCode::OK, Json(HealthResponse { status: "ok", products: Some(products.len()) }))
        }
        Err(e) => {
            warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse { status: "unavailable", products: None }),
            )
        }
    }
}

async fn list_batteries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<Json<PageResponse>> {
    let spec = QueryParams::from_map(&raw).to_spec_with(&state.paging);
    let products = state.source.load().await?;

    let result = query::query(products, &spec);
    info!(total = result.total, page = result.page, "listed batteries");

    let seo = state.site.listing(&base_url(&headers));
    Ok(Json(PageResponse::new(result, seo)))
}

async fn search_batteries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<Json<PageResponse>> {
    let spec = QueryParams::from_map(&raw).to_spec_with(&state.paging);
    let products = state.source.load().await?;

    let result = query::search(products, &spec);
    info!(term = ?spec.term, total = result.total, "searched batteries");

    let seo = state.site.search(&base_url(&headers), spec.term.as_deref());
    Ok(Json(PageResponse::new(result, seo)))
}

async fn get_battery(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> ApiResult<Json<ProductResponse>> {
    let products = state.source.load().await?;
    let product = find_by_slug(&products, &slug)?.clone();

    let seo = state.site.product(&base_url(&headers), &product);
    Ok(Json(ProductResponse { success: true, data: product, seo }))
}

async fn recommended(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<DataResponse<Vec<Product>>>> {
    let products = state.source.load().await?;
    let related = recommend(&products, &slug, state.recommendation_limit)?;
    Ok(DataResponse::ok(related))
}

async fn categories(State(state): State<AppState>) -> ApiResult<Json<DataResponse<Vec<String>>>> {
    facet_values(&state, Facet::Category).await
}

async fn brands(State(state): State<AppState>) -> ApiResult<Json<DataResponse<Vec<String>>>> {
    facet_values(&state, Facet::Brand).await
}

async fn capacities(State(state): State<AppState>) -> ApiResult<Json<DataResponse<Vec<String>>>> {
    facet_values(&state, Facet::Capacity).await
}

async fn facet_values(
    state: &AppState,
    facet: Facet,
) -> ApiResult<Json<DataResponse<Vec<String>>>> {
    let products = state.source.load().await?;
    Ok(DataResponse::ok(distinct_values(&products, facet)))
}

/// `scheme://host` of the incoming request, for canonical URLs.
fn base_url(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    format!("{}://{}", scheme, host)
}
