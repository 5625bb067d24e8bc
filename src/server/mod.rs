//! HTTP API over the battery catalog.

pub mod error;
pub mod routes;

use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::query::Paging;
use crate::seo::Site;
use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub use error::{ApiError, ApiResult};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CatalogSource>,
    pub paging: Paging,
    pub site: Site,
    pub recommendation_limit: usize,
}

impl AppState {
    pub fn new(config: &Config, source: Arc<dyn CatalogSource>) -> Self {
        Self {
            source,
            paging: config.paging(),
            site: config.site(),
            recommendation_limit: config.recommendation_limit,
        }
    }
}

/// Routes without middleware: `/` plus the API under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .nest("/api", routes::router())
        .with_state(state)
}

/// Full application: routes wrapped in tracing, timeout, and optional CORS.
pub fn app(state: AppState, config: &Config) -> Router {
    let mut app = router(state).layer(TimeoutLayer::new(config.request_timeout()));

    if let Some(cors) = config.cors_origin.as_deref().and_then(cors_layer) {
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: &str) -> Option<CorsLayer> {
    let origin = match origin.parse::<HeaderValue>() {
        Ok(v) => v,
        Err(_) => {
            warn!(origin = %origin, "ignoring unparseable CORS origin");
            return None;
        }
    };

    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true),
    )
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: &Config, source: Arc<dyn CatalogSource>) -> Result<()> {
    info!(source = %source.describe(), "Serving catalog");

    let app = app(AppState::new(config, source), config);

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("server error")
}
