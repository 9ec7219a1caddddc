//! Category and tag endpoints

use axum::{extract::State, Json};
use mapinsol_common::labels::category_display_name;
use serde::Serialize;

use crate::error::ApiResult;
use crate::models::Term;
use crate::AppState;

/// Term plus the name shown to visitors
#[derive(Debug, Serialize)]
pub struct TermView {
    #[serde(flatten)]
    pub term: Term,
    pub display_name: String,
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<TermView>>> {
    let categories = state.catalog.categories().await?;

    Ok(Json(
        categories
            .into_iter()
            .map(|term| TermView {
                display_name: category_display_name(&term.name).to_string(),
                term,
            })
            .collect(),
    ))
}

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> ApiResult<Json<Vec<TermView>>> {
    let tags = state.catalog.tags().await?;

    Ok(Json(
        tags.into_iter()
            .map(|term| TermView {
                display_name: term.name.clone(),
                term,
            })
            .collect(),
    ))
}
