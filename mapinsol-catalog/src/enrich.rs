//! Follow-up media lookups for fields the CMS cannot embed
//!
//! Gallery images and the practice PDF are stored as bare attachment ids.
//! Enrichment resolves them through a [`MediaSource`]; a failed lookup
//! degrades to an empty gallery / no PDF URL and never fails the caller.

use async_trait::async_trait;

use crate::cms::{CmsClient, CmsError};
use crate::models::{MediaAttachment, Practice};

/// Anything that can resolve media attachment ids
#[async_trait]
pub trait MediaSource: Send + Sync {
    async fn media_by_id(&self, id: u64) -> Result<Option<MediaAttachment>, CmsError>;

    /// Attachments in the order of `ids`, omitting unknown ids
    async fn media_by_ids(&self, ids: &[u64]) -> Result<Vec<MediaAttachment>, CmsError>;
}

#[async_trait]
impl MediaSource for CmsClient {
    async fn media_by_id(&self, id: u64) -> Result<Option<MediaAttachment>, CmsError> {
        CmsClient::media_by_id(self, id).await
    }

    async fn media_by_ids(&self, ids: &[u64]) -> Result<Vec<MediaAttachment>, CmsError> {
        CmsClient::media_by_ids(self, ids).await
    }
}

/// Attach gallery attachment details
///
/// No ids: returned unchanged, no lookup made.
pub async fn enrich_gallery<M>(media: &M, mut practice: Practice) -> Practice
where
    M: MediaSource + ?Sized,
{
    if practice.gallery_ids.is_empty() {
        return practice;
    }

    let details = match media.media_by_ids(&practice.gallery_ids).await {
        Ok(details) => details,
        Err(e) => {
            tracing::warn!(practice_id = practice.id, error = %e, "Gallery lookup failed");
            Vec::new()
        }
    };

    practice.gallery_details = Some(details);
    practice
}

/// Resolve the PDF attachment id into its URL
///
/// `pdf_id == 0`: returned unchanged, no lookup made.
pub async fn enrich_pdf_url<M>(media: &M, mut practice: Practice) -> Practice
where
    M: MediaSource + ?Sized,
{
    if practice.pdf_id == 0 {
        return practice;
    }

    practice.pdf_url = match media.media_by_id(practice.pdf_id).await {
        Ok(found) => found.map(|m| m.source_url).filter(|url| !url.is_empty()),
        Err(e) => {
            tracing::warn!(practice_id = practice.id, pdf_id = practice.pdf_id, error = %e, "PDF lookup failed");
            None
        }
    };
    practice
}

/// Both enrichments, run concurrently
pub async fn enrich_practice<M>(media: &M, practice: Practice) -> Practice
where
    M: MediaSource + ?Sized,
{
    let (with_gallery, with_pdf) = futures::join!(
        enrich_gallery(media, practice.clone()),
        enrich_pdf_url(media, practice)
    );

    Practice {
        pdf_url: with_pdf.pdf_url,
        ..with_gallery
    }
}
