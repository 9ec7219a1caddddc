//! WordPress REST client for the practice catalog
//!
//! - `client`: HTTP calls against the CMS endpoints
//! - `query`: listing parameters and endpoint constants

pub mod client;
pub mod query;

pub use client::{CmsClient, CmsConfig};
pub use query::PracticeQuery;

use serde::Serialize;
use thiserror::Error;

/// CMS client errors
#[derive(Debug, Error)]
pub enum CmsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("CMS API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Turn a non-2xx answer into `fallback`, logging it
///
/// Transport and parse errors are returned unchanged.
pub fn degrade_status<T>(
    result: Result<T, CmsError>,
    lookup: &str,
    fallback: impl FnOnce() -> T,
) -> Result<T, CmsError> {
    match result {
        Err(CmsError::ApiError(status, _)) => {
            tracing::warn!(lookup = %lookup, status = status, "CMS lookup failed, serving fallback");
            Ok(fallback())
        }
        other => other,
    }
}

/// Slugs gathered by a paged walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlugListing {
    pub slugs: Vec<String>,
    /// False when a page answered non-2xx and the walk stopped early
    pub complete: bool,
}

/// One page of a listing plus the CMS pagination totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    /// `x-wp-total` (0 when the header is missing)
    pub total: u64,
    /// `x-wp-totalpages` (0 when the header is missing)
    pub total_pages: u32,
}

/// Headline numbers for the whole catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub total_practices: u64,
    /// Categories with at least one practice
    pub total_categories: u64,
    /// Estimate: 70% of practices, rounded up
    pub unique_entities: u64,
}

impl CatalogStats {
    pub fn from_counts(total_practices: u64, total_categories: u64) -> Self {
        Self {
            total_practices,
            total_categories,
            unique_entities: (total_practices * 7).div_ceil(10),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrade_status_only_replaces_status_errors() {
        let degraded = degrade_status(Err(CmsError::ApiError(503, String::new())), "tags", Vec::<u32>::new);
        assert_eq!(degraded.unwrap(), Vec::<u32>::new());

        let network: Result<Vec<u32>, CmsError> =
            degrade_status(Err(CmsError::NetworkError("refused".into())), "tags", Vec::new);
        assert!(matches!(network, Err(CmsError::NetworkError(_))));

        assert_eq!(degrade_status(Ok(vec![1]), "tags", Vec::new).unwrap(), vec![1]);
    }

    #[test]
    fn test_unique_entities_estimate_rounds_up() {
        assert_eq!(CatalogStats::from_counts(10, 3).unique_entities, 7);
        assert_eq!(CatalogStats::from_counts(11, 3).unique_entities, 8);
        assert_eq!(CatalogStats::from_counts(0, 0).unique_entities, 0);
    }
}
