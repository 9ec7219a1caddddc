//! CMS wire shapes
//!
//! These mirror the JSON returned by `GET /buenas_practicas_ast` closely
//! enough to deserialize any record the CMS sends. Every field is defaulted;
//! the normalizer turns a `RawPractice` into a `Practice`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Practice record as returned by the CMS
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawPractice {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: RawRendered,
    #[serde(default)]
    pub featured_media: u64,
    /// Category ids
    #[serde(rename = "category-practices", default)]
    pub categories: Option<Vec<u64>>,
    /// Tag ids
    #[serde(rename = "tags-practices", default)]
    pub tags: Option<Vec<u64>>,
    /// Custom-field bag; an object when populated, `[]` when empty
    #[serde(default)]
    pub meta: Value,
    /// Inline relations, present when requested with `_embed`
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<RawEmbedded>,
}

/// WordPress `{ "rendered": ... }` wrapper
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawRendered {
    #[serde(default)]
    pub rendered: String,
}

/// `_embedded` block
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEmbedded {
    #[serde(rename = "wp:featuredmedia", default)]
    pub featured_media: Vec<RawEmbeddedMedia>,
    /// One group per taxonomy, in the order the CMS registers them
    #[serde(rename = "wp:term", default)]
    pub terms: Vec<Vec<RawTerm>>,
}

/// Embedded featured media entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEmbeddedMedia {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub media_details: Option<Value>,
}

/// Embedded taxonomy term
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTerm {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub taxonomy: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub count: u64,
}

/// Row of a `_fields=slug` listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSlug {
    #[serde(default)]
    pub slug: String,
}
