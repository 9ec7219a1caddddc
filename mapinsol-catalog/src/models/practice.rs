//! Practice domain model
//!
//! A `Practice` is the typed projection of one CMS "buena práctica" record.
//! Every field has a concrete default so consumers never deal with missing
//! values; overlay fields (`*_details`, `*_url`) are `None` until filled by
//! embedding or enrichment.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{MediaAttachment, Term};

/// WordPress publication status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Publish,
    Draft,
    Pending,
    Private,
    Future,
    Unknown,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Private => "private",
            Self::Future => "future",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&str> for PostStatus {
    fn from(value: &str) -> Self {
        match value {
            "publish" => Self::Publish,
            "draft" => Self::Draft,
            "pending" => Self::Pending,
            "private" => Self::Private,
            "future" => Self::Future,
            _ => Self::Unknown,
        }
    }
}

/// Lifecycle of the practice itself (not its publication)
///
/// The CMS stores this as free text; the known values are classified and
/// anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "label")]
pub enum LifecycleStatus {
    InProgress,
    Finished,
    Paused,
    Other(String),
    Unspecified,
}

impl LifecycleStatus {
    pub fn classify(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "" => Self::Unspecified,
            "en curso" => Self::InProgress,
            "finalizado" | "finalizada" => Self::Finished,
            "en pausa" => Self::Paused,
            _ => Self::Other(label.trim().to_string()),
        }
    }
}

/// Ordered set of vocabulary keys selected in a checkbox-group field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(Vec<String>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `key` unless already selected
    pub fn insert(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.0.contains(&key) {
            self.0.push(key);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|k| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode back into the CMS checkbox-group shape (`{key: "true"}`)
    pub fn to_meta(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|k| (k.clone(), Value::String("true".to_string())))
            .collect();
        Value::Object(map)
    }
}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// Contact person entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub role: String,
    pub organization: String,
    pub phone: String,
    pub email: String,
}

/// External link or annex
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    pub label: String,
    pub url: String,
}

/// A best-practice record
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Practice {
    // Identity
    pub id: u64,
    pub slug: String,
    pub title: String,
    pub status: PostStatus,
    pub link: String,
    pub date_published: Option<NaiveDateTime>,
    pub date_modified: Option<NaiveDateTime>,

    // Media references
    pub featured_media_id: u64,
    pub featured_media_url: Option<String>,
    pub pdf_id: u64,
    pub pdf_url: Option<String>,
    pub gallery_ids: Vec<u64>,
    pub gallery_details: Option<Vec<MediaAttachment>>,

    // General information
    pub responsible_entity: String,
    pub entity_url: String,
    pub contacts: Vec<Contact>,
    pub territorial_scope: String,
    pub is_international: bool,
    pub country: String,
    pub region: String,
    pub province: String,
    pub municipality: String,
    pub start_year: String,
    pub current_status: String,
    pub setting_type: String,

    // Description
    pub group_description: String,
    pub main_objective: String,
    pub activities: String,
    pub methodology: String,
    pub target_population: SelectionSet,
    pub involved_agents: SelectionSet,
    pub collaborator_name: String,
    pub collaborator_role: String,

    // Evaluation and results
    pub evaluation_indicators: String,
    pub results: String,
    pub lessons_learned: String,

    // Transferability and sustainability
    pub transferability_level: String,
    pub implementation_requirements: String,
    pub sustainability: String,

    // Ethics
    pub dignity_and_autonomy: String,
    pub abuse_prevention: String,
    pub participation: String,

    // Innovation
    pub innovative_element: String,
    pub technology_use: String,

    // Publications and links
    pub external_publication: String,
    pub video_url: String,
    pub external_links: Vec<ExternalLink>,

    // Visibility flags
    pub featured: bool,
    pub show_contact: bool,

    // Taxonomy references
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub categories_details: Option<Vec<Term>>,
    pub tags_details: Option<Vec<Term>>,
}

impl Practice {
    pub fn lifecycle(&self) -> LifecycleStatus {
        LifecycleStatus::classify(&self.current_status)
    }

    /// Comma-joined municipality, province and region, skipping blanks
    pub fn location_line(&self) -> String {
        [&self.municipality, &self.province, &self.region]
            .iter()
            .filter(|s| !s.is_empty())
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Gallery attachments whose MIME type is an image
    pub fn gallery_images(&self) -> Vec<MediaAttachment> {
        self.gallery_details
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|m| m.mime_type.contains("image"))
            .cloned()
            .collect()
    }
}
