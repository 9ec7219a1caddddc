//! Data models for the practice catalog
//!
//! - `practice`: the normalized domain record
//! - `raw`: the CMS wire shapes, before normalization
//! - taxonomy terms and media attachments, shared by both

pub mod practice;
pub mod raw;

pub use practice::{Contact, ExternalLink, LifecycleStatus, PostStatus, Practice, SelectionSet};
pub use raw::{RawEmbedded, RawEmbeddedMedia, RawPractice, RawRendered, RawSlug, RawTerm};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Taxonomy term (category or tag)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub count: u64,
}

/// Media library attachment (image, PDF, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaAttachment {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub mime_type: String,
    /// Only images carry dimensions and renditions; other types may send
    /// an empty array here, which is treated as absent
    #[serde(default, deserialize_with = "lenient_media_details")]
    pub media_details: Option<MediaDetails>,
}

/// Technical details of an image attachment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default)]
    pub sizes: BTreeMap<String, MediaSize>,
}

/// One generated rendition of an image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaSize {
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

fn lenient_media_details<'de, D>(deserializer: D) -> Result<Option<MediaDetails>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_media_with_renditions() {
        let media: MediaAttachment = serde_json::from_value(json!({
            "id": 10,
            "source_url": "https://cms/a.jpg",
            "alt_text": "Taller",
            "mime_type": "image/jpeg",
            "media_details": {
                "width": 1200,
                "height": 800,
                "sizes": { "large": { "source_url": "https://cms/a-1024.jpg", "width": 1024, "height": 683 } }
            }
        }))
        .unwrap();

        let details = media.media_details.unwrap();
        assert_eq!(details.width, Some(1200));
        assert_eq!(details.sizes["large"].source_url, "https://cms/a-1024.jpg");
    }

    #[test]
    fn test_media_details_array_is_absent() {
        let media: MediaAttachment = serde_json::from_value(json!({
            "id": 11,
            "source_url": "https://cms/doc.pdf",
            "mime_type": "application/pdf",
            "media_details": []
        }))
        .unwrap();

        assert_eq!(media.media_details, None);
        assert_eq!(media.alt_text, "");
    }

    #[test]
    fn test_term_defaults() {
        let term: Term = serde_json::from_value(json!({ "id": 29, "name": "Soledad" })).unwrap();
        assert_eq!(term.slug, "");
        assert_eq!(term.count, 0);
    }
}
