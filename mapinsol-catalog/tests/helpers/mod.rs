//! Test Helper Utilities
//!
//! Shared utilities for testing mapinsol-catalog

#![allow(dead_code)]

pub mod fake_cms;
pub mod fixtures;

use mapinsol_catalog::cms::{CmsClient, CmsConfig};
use mapinsol_catalog::{build_router, AppState, Catalog};
use mapinsol_common::config::RevalidateConfig;

pub use fake_cms::{spawn_failing_cms, spawn_fake_cms, spawn_fake_cms_with, unreachable_base_url, FakeCms, FakeOptions};

/// Client pointed at `base_url`
pub fn client_for(base_url: &str) -> CmsClient {
    CmsClient::new(CmsConfig::new(base_url)).expect("CMS client")
}

/// Catalog with default revalidation intervals
pub fn catalog_for(base_url: &str) -> Catalog {
    Catalog::new(client_for(base_url), &RevalidateConfig::default())
}

/// Full router over a catalog pointed at `base_url`
pub fn app_for(base_url: &str) -> axum::Router {
    build_router(AppState::new(catalog_for(base_url)))
}
