//! Cached view of the CMS
//!
//! `Catalog` wraps a [`CmsClient`] with one revalidation cache per resource
//! kind and assembles the data each HTTP view needs, issuing independent
//! CMS calls concurrently.
//!
//! Only answers the CMS actually gave are cached. Optional lookups that fail
//! with a non-2xx status still degrade to empty/`None`, but the degraded value
//! is produced after the cache lookup so the next call asks the CMS again.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use mapinsol_common::config::RevalidateConfig;

use crate::cache::{TtlCache, DEFAULT_MAX_ENTRIES};
use crate::cms::query::MAX_PER_PAGE;
use crate::cms::{degrade_status, CatalogStats, CmsClient, CmsError, Paginated, PracticeQuery};
use crate::enrich::{enrich_practice, MediaSource};
use crate::models::{MediaAttachment, Practice, Term};
use crate::normalize::{CATEGORY_TAXONOMY, TAG_TAXONOMY};
use crate::related::{related_practices, ScoredPractice, RELATED_LIMIT};

/// Recent practices scanned for featured ones
pub const FEATURED_SOURCE: u32 = 20;

/// Featured practices shown on the home page
pub const FEATURED_LIMIT: usize = 5;

/// Latest practices shown on the home page
pub const LATEST_LIMIT: u32 = 6;

/// Everything the listing view is built from
#[derive(Debug, Clone)]
pub struct ListingData {
    pub practices: Paginated<Practice>,
    pub categories: Vec<Term>,
    pub tags: Vec<Term>,
}

/// An enriched practice and its related practices
#[derive(Debug, Clone)]
pub struct PracticeDetail {
    pub practice: Practice,
    pub related: Vec<ScoredPractice>,
}

pub struct Catalog {
    client: CmsClient,
    practices: TtlCache<PracticeQuery, Paginated<Practice>>,
    by_slug: TtlCache<String, Option<Practice>>,
    slugs: TtlCache<(), Vec<String>>,
    taxonomies: TtlCache<&'static str, Vec<Term>>,
    stats: TtlCache<(), CatalogStats>,
    media: TtlCache<u64, Option<MediaAttachment>>,
}

impl Catalog {
    pub fn new(client: CmsClient, revalidate: &RevalidateConfig) -> Self {
        let practices_ttl = Duration::from_secs(revalidate.practices_secs);
        let taxonomies_ttl = Duration::from_secs(revalidate.taxonomies_secs);
        let media_ttl = Duration::from_secs(revalidate.media_secs);

        Self {
            client,
            practices: TtlCache::new(practices_ttl, DEFAULT_MAX_ENTRIES),
            by_slug: TtlCache::new(practices_ttl, DEFAULT_MAX_ENTRIES),
            slugs: TtlCache::new(practices_ttl, 1),
            taxonomies: TtlCache::new(taxonomies_ttl, 2),
            stats: TtlCache::new(taxonomies_ttl, 1),
            media: TtlCache::new(media_ttl, DEFAULT_MAX_ENTRIES),
        }
    }

    pub fn client(&self) -> &CmsClient {
        &self.client
    }

    /// Every published practice, newest first
    pub async fn all_practices(&self) -> Result<Paginated<Practice>, CmsError> {
        let query = PracticeQuery {
            per_page: MAX_PER_PAGE,
            ..Default::default()
        };

        self.practices
            .get_or_try_insert_with(query.clone(), || async move {
                self.client.fetch_all_practices(&query).await
            })
            .await
    }

    /// One page of practices, newest first
    pub async fn practice_page(&self, query: PracticeQuery) -> Result<Paginated<Practice>, CmsError> {
        self.practices
            .get_or_try_insert_with(query.clone(), || async move { self.client.list_practices(&query).await })
            .await
    }

    /// Featured practices among the most recent ones; empty when none is featured
    pub async fn featured_practices(&self) -> Result<Vec<Practice>, CmsError> {
        let recent = self
            .practice_page(PracticeQuery {
                per_page: FEATURED_SOURCE,
                ..Default::default()
            })
            .await?;

        Ok(recent
            .data
            .into_iter()
            .filter(|p| p.featured)
            .take(FEATURED_LIMIT)
            .collect())
    }

    /// Most recently published practices
    pub async fn latest_practices(&self) -> Result<Vec<Practice>, CmsError> {
        let page = self
            .practice_page(PracticeQuery {
                per_page: LATEST_LIMIT,
                ..Default::default()
            })
            .await?;

        Ok(page.data)
    }

    pub async fn practice_by_slug(&self, slug: &str) -> Result<Option<Practice>, CmsError> {
        let cached = self
            .by_slug
            .get_or_try_insert_with(slug.to_string(), || self.client.try_practice_by_slug(slug))
            .await;
        degrade_status(cached, "practice by slug", || None)
    }

    /// Slugs of every published practice
    ///
    /// A listing cut short by a failed page is served but not cached.
    pub async fn practice_slugs(&self) -> Result<Vec<String>, CmsError> {
        if let Some(slugs) = self.slugs.get(&()).await {
            return Ok(slugs);
        }

        let listing = self.client.slug_listing().await?;
        if listing.complete {
            self.slugs.insert((), listing.slugs.clone()).await;
        }
        Ok(listing.slugs)
    }

    pub async fn categories(&self) -> Result<Vec<Term>, CmsError> {
        let cached = self
            .taxonomies
            .get_or_try_insert_with(CATEGORY_TAXONOMY, || self.client.try_categories())
            .await;
        degrade_status(cached, CATEGORY_TAXONOMY, Vec::new)
    }

    pub async fn tags(&self) -> Result<Vec<Term>, CmsError> {
        let cached = self
            .taxonomies
            .get_or_try_insert_with(TAG_TAXONOMY, || self.client.try_tags())
            .await;
        degrade_status(cached, TAG_TAXONOMY, Vec::new)
    }

    pub async fn stats(&self) -> Result<CatalogStats, CmsError> {
        self.stats
            .get_or_try_insert_with((), || self.client.catalog_stats())
            .await
    }

    /// Practices, categories and tags, fetched together
    pub async fn listing_data(&self) -> Result<ListingData, CmsError> {
        let (practices, categories, tags) =
            futures::try_join!(self.all_practices(), self.categories(), self.tags())?;

        Ok(ListingData {
            practices,
            categories,
            tags,
        })
    }

    /// Enriched practice plus related practices, `None` for an unknown slug
    ///
    /// The full practice set is only needed for scoring; if it cannot be
    /// fetched the detail is served without related practices.
    pub async fn practice_detail(&self, slug: &str) -> Result<Option<PracticeDetail>, CmsError> {
        let Some(practice) = self.practice_by_slug(slug).await? else {
            return Ok(None);
        };

        let (practice, all) = futures::join!(enrich_practice(self, practice), self.all_practices());

        let related = match all {
            Ok(all) => related_practices(&practice, &all.data, RELATED_LIMIT),
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "Related practices unavailable");
                Vec::new()
            }
        };

        Ok(Some(PracticeDetail { practice, related }))
    }
}

#[async_trait]
impl MediaSource for Catalog {
    /// A 404 is cached as `None`; other failures are not cached
    async fn media_by_id(&self, id: u64) -> Result<Option<MediaAttachment>, CmsError> {
        let cached = self
            .media
            .get_or_try_insert_with(id, || self.client.try_media_by_id(id))
            .await;
        degrade_status(cached, "media by id", || None)
    }

    async fn media_by_ids(&self, ids: &[u64]) -> Result<Vec<MediaAttachment>, CmsError> {
        let mut found: HashMap<u64, MediaAttachment> = HashMap::new();
        let mut missing = Vec::new();

        for id in ids {
            match self.media.get(id).await {
                Some(Some(media)) => {
                    found.insert(*id, media);
                }
                Some(None) => {}
                None => missing.push(*id),
            }
        }

        if !missing.is_empty() {
            for media in self.client.media_by_ids(&missing).await? {
                self.media.insert(media.id, Some(media.clone())).await;
                found.insert(media.id, media);
            }
        }

        Ok(ids.iter().filter_map(|id| found.get(id).cloned()).collect())
    }
}
