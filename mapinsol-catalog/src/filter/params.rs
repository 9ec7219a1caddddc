//! Listing query-string binding
//!
//! The public listing URL uses Spanish parameter names:
//! `buscar`, `categoria`, `etiqueta`, `anio`, `estado`, `poblacion`,
//! `agentes`, `ccaa`, `internacional=true`, `localidad` and `pagina`.
//! Selection parameters may repeat to select several values.

use mapinsol_common::labels::category_display_name;
use serde::Serialize;
use url::form_urlencoded;

use super::FilterCriteria;
use crate::models::Term;

/// Listing parameters as received, before names are resolved to ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingQuery {
    pub search: Option<String>,
    /// Category names
    pub categories: Vec<String>,
    /// Tag names
    pub tags: Vec<String>,
    pub years: Vec<String>,
    pub statuses: Vec<String>,
    pub populations: Vec<String>,
    pub agents: Vec<String>,
    pub regions: Vec<String>,
    pub international_only: bool,
    pub locality: Option<String>,
    /// 1-based; unparseable values fall back to 1
    pub page: u32,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: None,
            categories: Vec::new(),
            tags: Vec::new(),
            years: Vec::new(),
            statuses: Vec::new(),
            populations: Vec::new(),
            agents: Vec::new(),
            regions: Vec::new(),
            international_only: false,
            locality: None,
            page: 1,
        }
    }
}

impl ListingQuery {
    /// Parse a raw query string; unknown parameters and blank values are ignored
    ///
    /// Free-text values (`buscar`, `localidad`) are kept as typed, surrounding
    /// spaces included; selection values are trimmed.
    pub fn from_query(query: &str) -> Self {
        let mut listing = Self::default();

        for (key, raw) in form_urlencoded::parse(query.as_bytes()) {
            if raw.trim().is_empty() {
                continue;
            }
            let value = raw.trim().to_string();

            match key.as_ref() {
                "buscar" => listing.search = Some(raw.into_owned()),
                "categoria" => push_unique(&mut listing.categories, value),
                "etiqueta" => push_unique(&mut listing.tags, value),
                "anio" => push_unique(&mut listing.years, value),
                "estado" => push_unique(&mut listing.statuses, value),
                "poblacion" => push_unique(&mut listing.populations, value),
                "agentes" => push_unique(&mut listing.agents, value),
                "ccaa" => push_unique(&mut listing.regions, value),
                "internacional" => listing.international_only = value == "true",
                "localidad" => listing.locality = Some(raw.into_owned()),
                "pagina" => listing.page = value.parse().ok().filter(|p| *p > 0).unwrap_or(1),
                _ => {}
            }
        }

        listing
    }

    /// Resolve category and tag names against the known terms
    ///
    /// Names that match no term are dropped rather than selecting nothing.
    pub fn to_criteria(&self, categories: &[Term], tags: &[Term]) -> FilterCriteria {
        FilterCriteria {
            search: self.search.clone(),
            categories: self
                .categories
                .iter()
                .filter_map(|name| find_category(categories, name))
                .collect(),
            tags: self
                .tags
                .iter()
                .filter_map(|name| {
                    let name = name.to_lowercase();
                    tags.iter().find(|t| t.name.to_lowercase() == name).map(|t| t.id)
                })
                .collect(),
            years: self.years.clone(),
            statuses: self.statuses.clone(),
            populations: self.populations.clone(),
            agents: self.agents.clone(),
            regions: self.regions.clone(),
            international_only: self.international_only,
            locality: self.locality.clone(),
        }
    }
}

/// Category whose name or display name equals `name`, ignoring case
fn find_category(categories: &[Term], name: &str) -> Option<u64> {
    let name = name.to_lowercase();
    categories
        .iter()
        .find(|c| {
            c.name.to_lowercase() == name || category_display_name(&c.name).to_lowercase() == name
        })
        .map(|c| c.id)
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}
