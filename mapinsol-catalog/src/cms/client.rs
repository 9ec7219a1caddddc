//! CMS REST client
//!
//! Read-only access to the practice custom post type, its two taxonomies and
//! the media library. Practice listings fail hard on a non-2xx status; optional
//! lookups (taxonomies, media, by-slug) degrade to empty/`None` and log a
//! warning. Each optional lookup has a `try_*` variant that reports the
//! status as an error instead, for callers that must not mistake a failed
//! answer for a real one.

use std::collections::HashMap;
use std::time::Duration;

use futures::future::try_join_all;
use futures::{stream, StreamExt, TryStreamExt};
use mapinsol_common::config::TomlConfig;
use reqwest::header::HeaderMap;
use reqwest::Response;
use serde::de::DeserializeOwned;

use super::query::{
    join_ids, PracticeQuery, MAX_PER_PAGE, MEDIA_FIELDS, PAGE_FETCH_CONCURRENCY, PRACTICES_ENDPOINT,
    TERM_FIELDS,
};
use super::{degrade_status, CatalogStats, CmsError, Paginated, SlugListing};
use crate::models::{MediaAttachment, Practice, RawPractice, RawSlug, Term};
use crate::normalize::{normalize_all, normalize_practice, CATEGORY_TAXONOMY, TAG_TAXONOMY};

const USER_AGENT: &str = concat!("mapinsol-catalog/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the CMS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsConfig {
    /// REST root, e.g. `https://example.org/wp-json/wp/v2`
    pub base_url: String,
    pub timeout: Duration,
}

impl CmsConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl From<&TomlConfig> for CmsConfig {
    fn from(config: &TomlConfig) -> Self {
        Self {
            base_url: config.cms_base_url().to_string(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }
}

/// WordPress REST client
#[derive(Debug, Clone)]
pub struct CmsClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CmsClient {
    pub fn new(config: CmsConfig) -> Result<Self, CmsError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| CmsError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Response, CmsError> {
        let url = format!("{}/{}", self.base_url, path);

        tracing::debug!(url = %url, params = ?params, "Querying CMS");

        self.http_client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| CmsError::NetworkError(e.to_string()))
    }

    /// One page of published practices
    ///
    /// Any non-2xx status is an error.
    pub async fn list_practices(&self, query: &PracticeQuery) -> Result<Paginated<Practice>, CmsError> {
        let response = self.get(PRACTICES_ENDPOINT, &query.to_params()).await?;
        let response = ensure_success(response).await?;

        let (total, total_pages) = pagination_headers(response.headers());
        let raw: Vec<RawPractice> = parse_json(response).await?;

        tracing::debug!(
            page = query.page,
            count = raw.len(),
            total = total,
            "Fetched practice page"
        );

        Ok(Paginated {
            data: normalize_all(&raw),
            total,
            total_pages,
        })
    }

    /// Every practice matching `query`, 100 per request
    ///
    /// Page 1 is fetched first to learn the page count; the remaining pages
    /// are requested at most `PAGE_FETCH_CONCURRENCY` at a time and appended
    /// in page order.
    pub async fn fetch_all_practices(&self, query: &PracticeQuery) -> Result<Paginated<Practice>, CmsError> {
        let base = PracticeQuery {
            per_page: MAX_PER_PAGE,
            ..query.with_page(1)
        };

        let first = self.list_practices(&base).await?;
        let total_pages = first.total_pages;

        let rest: Vec<Paginated<Practice>> = stream::iter((2..=total_pages).map(|page| {
            let query = base.with_page(page);
            async move { self.list_practices(&query).await }
        }))
        .buffered(PAGE_FETCH_CONCURRENCY)
        .try_collect()
        .await?;

        let mut data = first.data;
        for page in rest {
            data.extend(page.data);
        }

        tracing::info!(
            total = first.total,
            pages = total_pages,
            fetched = data.len(),
            "Fetched all practices"
        );

        Ok(Paginated {
            data,
            total: first.total,
            total_pages,
        })
    }

    /// Practice with the given slug
    ///
    /// Returns `None` on a non-2xx status or when no record matches.
    pub async fn practice_by_slug(&self, slug: &str) -> Result<Option<Practice>, CmsError> {
        degrade_status(self.try_practice_by_slug(slug).await, "practice by slug", || None)
    }

    /// Practice with the given slug; a non-2xx status is an error
    pub async fn try_practice_by_slug(&self, slug: &str) -> Result<Option<Practice>, CmsError> {
        let params = [
            ("slug", slug.to_string()),
            ("per_page", "1".to_string()),
            ("_embed", "1".to_string()),
        ];

        let response = self.get(PRACTICES_ENDPOINT, &params).await?;
        let response = ensure_success(response).await?;

        let raw: Vec<RawPractice> = parse_json(response).await?;
        Ok(raw.first().map(normalize_practice))
    }

    /// Slugs of every published practice
    ///
    /// Stops early, keeping what was collected, at the first non-2xx page.
    pub async fn all_practice_slugs(&self) -> Result<Vec<String>, CmsError> {
        Ok(self.slug_listing().await?.slugs)
    }

    /// Slugs of every published practice, flagged incomplete on an early stop
    pub async fn slug_listing(&self) -> Result<SlugListing, CmsError> {
        let mut slugs = Vec::new();
        let mut complete = true;
        let mut page: u32 = 1;

        loop {
            let params = [
                ("per_page", MAX_PER_PAGE.to_string()),
                ("page", page.to_string()),
                ("status", "publish".to_string()),
                ("_fields", "slug".to_string()),
            ];

            let response = self.get(PRACTICES_ENDPOINT, &params).await?;
            if !response.status().is_success() {
                tracing::warn!(page = page, status = %response.status(), "Slug listing stopped early");
                complete = false;
                break;
            }

            let (_, total_pages) = pagination_headers(response.headers());
            let rows: Vec<RawSlug> = parse_json(response).await?;
            slugs.extend(rows.into_iter().map(|r| r.slug));

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        Ok(SlugListing { slugs, complete })
    }

    /// All practice categories, by name; empty on a non-2xx status
    pub async fn categories(&self) -> Result<Vec<Term>, CmsError> {
        degrade_status(self.try_categories().await, CATEGORY_TAXONOMY, Vec::new)
    }

    /// All practice tags, by name; empty on a non-2xx status
    pub async fn tags(&self) -> Result<Vec<Term>, CmsError> {
        degrade_status(self.try_tags().await, TAG_TAXONOMY, Vec::new)
    }

    pub async fn try_categories(&self) -> Result<Vec<Term>, CmsError> {
        self.try_terms(CATEGORY_TAXONOMY).await
    }

    pub async fn try_tags(&self) -> Result<Vec<Term>, CmsError> {
        self.try_terms(TAG_TAXONOMY).await
    }

    async fn try_terms(&self, taxonomy: &str) -> Result<Vec<Term>, CmsError> {
        let params = [
            ("per_page", MAX_PER_PAGE.to_string()),
            ("orderby", "name".to_string()),
            ("order", "asc".to_string()),
            ("_fields", TERM_FIELDS.to_string()),
        ];

        let response = self.get(taxonomy, &params).await?;
        let response = ensure_success(response).await?;
        parse_json(response).await
    }

    /// Single media attachment; `None` on any non-2xx status
    pub async fn media_by_id(&self, id: u64) -> Result<Option<MediaAttachment>, CmsError> {
        degrade_status(self.try_media_by_id(id).await, "media by id", || None)
    }

    /// Single media attachment
    ///
    /// 404 means the attachment does not exist and yields `None`; any other
    /// non-2xx status is an error.
    pub async fn try_media_by_id(&self, id: u64) -> Result<Option<MediaAttachment>, CmsError> {
        let params = [("_fields", MEDIA_FIELDS.to_string())];

        let response = self.get(&format!("media/{}", id), &params).await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(media_id = id, "Media attachment not found");
            return Ok(None);
        }

        let response = ensure_success(response).await?;
        parse_json(response).await.map(Some)
    }

    /// Several media attachments in as few requests as possible
    ///
    /// Results follow the order of `ids`; ids the CMS does not return are
    /// omitted. An empty `ids` makes no request.
    pub async fn media_by_ids(&self, ids: &[u64]) -> Result<Vec<MediaAttachment>, CmsError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let chunks = try_join_all(ids.chunks(MAX_PER_PAGE as usize).map(|chunk| self.media_chunk(chunk))).await?;

        let mut by_id: HashMap<u64, MediaAttachment> = chunks
            .into_iter()
            .flatten()
            .map(|media| (media.id, media))
            .collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    async fn media_chunk(&self, ids: &[u64]) -> Result<Vec<MediaAttachment>, CmsError> {
        let params = [
            ("include", join_ids(ids)),
            ("per_page", ids.len().to_string()),
            ("orderby", "include".to_string()),
            ("_fields", MEDIA_FIELDS.to_string()),
        ];

        let response = self.get("media", &params).await?;
        if !response.status().is_success() {
            tracing::warn!(count = ids.len(), status = %response.status(), "Media batch lookup failed");
            return Ok(Vec::new());
        }

        parse_json(response).await
    }

    /// Published practice total and populated category count, fetched together
    ///
    /// A non-2xx on either request is an error, so a failed category list is
    /// never reported as zero categories.
    pub async fn catalog_stats(&self) -> Result<CatalogStats, CmsError> {
        let (total, categories) = futures::try_join!(self.published_total(), self.try_categories())?;
        let populated = categories.iter().filter(|c| c.count > 0).count() as u64;

        Ok(CatalogStats::from_counts(total, populated))
    }

    async fn published_total(&self) -> Result<u64, CmsError> {
        let params = [
            ("per_page", "1".to_string()),
            ("status", "publish".to_string()),
            ("_fields", "id".to_string()),
        ];

        let response = self.get(PRACTICES_ENDPOINT, &params).await?;
        let response = ensure_success(response).await?;
        Ok(pagination_headers(response.headers()).0)
    }
}

async fn ensure_success(response: Response) -> Result<Response, CmsError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    Err(CmsError::ApiError(status.as_u16(), error_text))
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, CmsError> {
    response
        .json()
        .await
        .map_err(|e| CmsError::ParseError(e.to_string()))
}

/// `x-wp-total` and `x-wp-totalpages`, each 0 when missing or malformed
fn pagination_headers(headers: &HeaderMap) -> (u64, u32) {
    fn read<T: std::str::FromStr + Default>(headers: &HeaderMap, name: &str) -> T {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_default()
    }

    (read(headers, "x-wp-total"), read(headers, "x-wp-totalpages"))
}
