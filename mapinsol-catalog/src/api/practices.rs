//! Practice listing, detail and slug endpoints

use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use mapinsol_common::labels::{category_display_name, format_label};
use mapinsol_common::text::{
    strip_html, summary, transferability_percentage, truncate, video_embed_url, youtube_id,
};
use serde::Serialize;

use crate::error::{ApiError, ApiResult};
use crate::filter::{filter_practices, unique_entities, FilterCriteria, FilterOptions, ListingQuery};
use crate::models::{LifecycleStatus, MediaAttachment, Practice, SelectionSet};
use crate::pagination::{calculate_pagination, page_slice, page_window, PageLink, Pagination, PAGE_SIZE};
use crate::AppState;

/// Characters of the main objective shown on a card
pub const CARD_EXCERPT_LENGTH: usize = 150;

/// Compact practice for listing grids and related lists
#[derive(Debug, Clone, Serialize)]
pub struct PracticeCard {
    pub id: u64,
    pub slug: String,
    pub title: String,
    /// Plain-text start of the main objective
    pub excerpt: String,
    pub cover_url: Option<String>,
    pub current_status: String,
    pub location: String,
    pub responsible_entity: String,
    pub start_year: String,
    /// Display names of the embedded categories
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub has_pdf: bool,
    pub featured: bool,
}

impl From<&Practice> for PracticeCard {
    fn from(p: &Practice) -> Self {
        let cover_url = p.featured_media_url.clone().or_else(|| {
            p.gallery_details
                .as_deref()
                .and_then(|g| g.first())
                .map(|m| m.source_url.clone())
                .filter(|url| !url.is_empty())
        });

        Self {
            id: p.id,
            slug: p.slug.clone(),
            title: p.title.clone(),
            excerpt: truncate(&strip_html(&p.main_objective), CARD_EXCERPT_LENGTH),
            cover_url,
            current_status: p.current_status.clone(),
            location: p.location_line(),
            responsible_entity: p.responsible_entity.clone(),
            start_year: p.start_year.clone(),
            categories: p
                .categories_details
                .iter()
                .flatten()
                .map(|c| category_display_name(&c.name).to_string())
                .collect(),
            tags: p.tags_details.iter().flatten().map(|t| t.name.clone()).collect(),
            has_pdf: p.pdf_id > 0,
            featured: p.featured,
        }
    }
}

/// Vocabulary key with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledKey {
    pub key: String,
    pub label: String,
}

fn labeled(set: &SelectionSet) -> Vec<LabeledKey> {
    set.iter()
        .map(|key| LabeledKey {
            key: key.to_string(),
            label: format_label(key),
        })
        .collect()
}

/// GET /api/practices response
#[derive(Debug, Serialize)]
pub struct ListingResponse {
    /// Published practices in the CMS
    pub total: u64,
    /// Distinct responsible entities among them
    pub unique_entities: usize,
    /// Practices passing the filters
    pub matched: usize,
    pub page_size: usize,
    pub pagination: Pagination,
    pub pages: Vec<PageLink>,
    pub items: Vec<PracticeCard>,
    pub filters: FilterOptions,
    pub criteria: FilterCriteria,
}

/// GET /api/practices
///
/// Filters the full catalog in memory, then returns one page of 12.
pub async fn list_practices(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<ListingResponse>> {
    let listing = ListingQuery::from_query(query.as_deref().unwrap_or_default());
    let data = state.catalog.listing_data().await?;

    let criteria = listing.to_criteria(&data.categories, &data.tags);
    let all = &data.practices.data;
    let matched = filter_practices(all, &criteria);

    let pagination = calculate_pagination(matched.len(), listing.page as usize);
    let items = page_slice(&matched, &pagination)
        .iter()
        .map(PracticeCard::from)
        .collect();

    tracing::debug!(
        total = data.practices.total,
        matched = matched.len(),
        page = pagination.page,
        "Listing served"
    );

    Ok(Json(ListingResponse {
        total: data.practices.total,
        unique_entities: unique_entities(all),
        matched: matched.len(),
        page_size: PAGE_SIZE,
        pages: page_window(pagination.page, pagination.total_pages),
        pagination,
        items,
        filters: FilterOptions::from_practices(all),
        criteria,
    }))
}

/// GET /api/practices/featured
///
/// Up to five featured practices among the twenty most recent.
pub async fn list_featured(State(state): State<AppState>) -> ApiResult<Json<Vec<PracticeCard>>> {
    let featured = state.catalog.featured_practices().await?;
    Ok(Json(featured.iter().map(PracticeCard::from).collect()))
}

/// GET /api/practices/latest
pub async fn list_latest(State(state): State<AppState>) -> ApiResult<Json<Vec<PracticeCard>>> {
    let latest = state.catalog.latest_practices().await?;
    Ok(Json(latest.iter().map(PracticeCard::from).collect()))
}

/// Related practice with its score
#[derive(Debug, Serialize)]
pub struct RelatedCard {
    pub score: u32,
    #[serde(flatten)]
    pub card: PracticeCard,
}

/// GET /api/practices/{slug} response
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub practice: Practice,
    pub lifecycle: LifecycleStatus,
    pub location: String,
    /// Plain-text description for page metadata
    pub summary: String,
    /// Gallery attachments that are images
    pub images: Vec<MediaAttachment>,
    pub youtube_id: Option<String>,
    pub video_embed_url: Option<String>,
    pub population: Vec<LabeledKey>,
    pub agents: Vec<LabeledKey>,
    pub transferability_percentage: u8,
    pub related: Vec<RelatedCard>,
}

/// GET /api/practices/{slug}
///
/// Contacts are withheld unless the practice allows showing them.
pub async fn get_practice(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<DetailResponse>> {
    let detail = state
        .catalog
        .practice_detail(&slug)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("practice '{}'", slug)))?;

    let mut practice = detail.practice;
    if !practice.show_contact {
        practice.contacts.clear();
    }

    let response = DetailResponse {
        lifecycle: practice.lifecycle(),
        location: practice.location_line(),
        summary: summary(&practice.title, &practice.main_objective),
        images: practice.gallery_images(),
        youtube_id: youtube_id(&practice.video_url),
        video_embed_url: video_embed_url(&practice.video_url),
        population: labeled(&practice.target_population),
        agents: labeled(&practice.involved_agents),
        transferability_percentage: transferability_percentage(&practice.transferability_level),
        related: detail
            .related
            .iter()
            .map(|s| RelatedCard {
                score: s.score,
                card: PracticeCard::from(&s.practice),
            })
            .collect(),
        practice,
    };

    Ok(Json(response))
}

/// GET /api/slugs response
#[derive(Debug, Serialize)]
pub struct SlugsResponse {
    pub count: usize,
    pub slugs: Vec<String>,
}

/// GET /api/slugs
pub async fn list_slugs(State(state): State<AppState>) -> ApiResult<Json<SlugsResponse>> {
    let slugs = state.catalog.practice_slugs().await?;
    Ok(Json(SlugsResponse {
        count: slugs.len(),
        slugs,
    }))
}
