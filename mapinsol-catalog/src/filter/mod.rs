//! In-memory practice filtering
//!
//! Criteria combine with AND; the values selected within one criterion
//! combine with OR. An empty selection imposes no constraint, so the
//! default `FilterCriteria` keeps every record.

pub mod options;
pub mod params;

pub use options::FilterOptions;
pub use params::ListingQuery;

use serde::Serialize;

use crate::models::Practice;

/// Active filter selections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    /// Matched against title, responsible entity and location fields
    pub search: Option<String>,
    pub categories: Vec<u64>,
    pub tags: Vec<u64>,
    pub years: Vec<String>,
    pub statuses: Vec<String>,
    pub populations: Vec<String>,
    pub agents: Vec<String>,
    pub regions: Vec<String>,
    pub international_only: bool,
    /// Matched against municipality, province and country
    pub locality: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        active_text(&self.search).is_none()
            && self.categories.is_empty()
            && self.tags.is_empty()
            && self.years.is_empty()
            && self.statuses.is_empty()
            && self.populations.is_empty()
            && self.agents.is_empty()
            && self.regions.is_empty()
            && !self.international_only
            && active_text(&self.locality).is_none()
    }

    pub fn matches(&self, practice: &Practice) -> bool {
        if let Some(query) = active_text(&self.search) {
            let query = query.to_lowercase();
            let hit = [
                &practice.title,
                &practice.responsible_entity,
                &practice.region,
                &practice.province,
                &practice.municipality,
            ]
            .iter()
            .any(|field| contains_lower(field, &query));
            if !hit {
                return false;
            }
        }

        if !self.categories.is_empty() && !practice.categories.iter().any(|c| self.categories.contains(c)) {
            return false;
        }

        if !self.years.is_empty() && !self.years.contains(&practice.start_year) {
            return false;
        }

        if !self.statuses.is_empty() && !self.statuses.contains(&practice.current_status) {
            return false;
        }

        if !self.tags.is_empty() && !practice.tags.iter().any(|t| self.tags.contains(t)) {
            return false;
        }

        if !self.populations.is_empty()
            && !self.populations.iter().any(|k| practice.target_population.contains(k))
        {
            return false;
        }

        if !self.agents.is_empty() && !self.agents.iter().any(|k| practice.involved_agents.contains(k)) {
            return false;
        }

        if !self.regions.is_empty() && !self.regions.contains(&practice.region) {
            return false;
        }

        if self.international_only && !practice.is_international {
            return false;
        }

        if let Some(locality) = active_text(&self.locality) {
            let locality = locality.to_lowercase();
            let hit = [&practice.municipality, &practice.province, &practice.country]
                .iter()
                .any(|field| contains_lower(field, &locality));
            if !hit {
                return false;
            }
        }

        true
    }
}

/// Records matching `criteria`, in their original order
pub fn filter_practices(practices: &[Practice], criteria: &FilterCriteria) -> Vec<Practice> {
    practices
        .iter()
        .filter(|p| criteria.matches(p))
        .cloned()
        .collect()
}

/// Distinct non-empty responsible entities
pub fn unique_entities(practices: &[Practice]) -> usize {
    let mut seen: Vec<&str> = practices
        .iter()
        .map(|p| p.responsible_entity.as_str())
        .filter(|e| !e.is_empty())
        .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}

fn active_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn contains_lower(field: &str, needle_lower: &str) -> bool {
    field.to_lowercase().contains(needle_lower)
}
