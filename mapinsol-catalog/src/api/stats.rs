//! Catalog statistics endpoint

use axum::{extract::State, Json};

use crate::cms::CatalogStats;
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/stats
///
/// Published total, populated categories and the estimated entity count.
pub async fn get_stats(State(state): State<AppState>) -> ApiResult<Json<CatalogStats>> {
    let stats = state.catalog.stats().await?;
    Ok(Json(stats))
}
