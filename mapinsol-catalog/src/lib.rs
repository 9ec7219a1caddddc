//! mapinsol-catalog library - best-practice catalog service
//!
//! Reads practice records from the foundation's WordPress CMS, normalizes
//! them and serves listing, detail, taxonomy and statistics views as JSON.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cache;
pub mod catalog;
pub mod cms;
pub mod enrich;
pub mod error;
pub mod filter;
pub mod models;
pub mod normalize;
pub mod pagination;
pub mod related;

pub use catalog::Catalog;
pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Cached CMS access
    pub catalog: Arc<Catalog>,
    /// Server start, for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let practice_routes = Router::new()
        .route("/api/practices", get(api::list_practices))
        .route("/api/practices/featured", get(api::list_featured))
        .route("/api/practices/latest", get(api::list_latest))
        .route("/api/practices/:slug", get(api::get_practice))
        .route("/api/categories", get(api::list_categories))
        .route("/api/tags", get(api::list_tags))
        .route("/api/stats", get(api::get_stats))
        .route("/api/slugs", get(api::list_slugs));

    Router::new()
        .merge(practice_routes)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
