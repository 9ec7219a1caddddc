//! Practice listing parameters

use crate::normalize::{CATEGORY_TAXONOMY, TAG_TAXONOMY};

/// Custom post type holding the practices
pub const PRACTICES_ENDPOINT: &str = "buenas_practicas_ast";

/// Fields requested for media attachments
pub const MEDIA_FIELDS: &str = "id,source_url,alt_text,mime_type,media_details";

/// Fields requested for taxonomy terms
pub const TERM_FIELDS: &str = "id,name,slug,count,description,link";

/// Largest page the CMS serves
pub const MAX_PER_PAGE: u32 = 100;

/// Default page size for listings
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Pages of a multi-page listing requested at once
pub const PAGE_FETCH_CONCURRENCY: usize = 4;

/// Parameters for `GET /buenas_practicas_ast`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PracticeQuery {
    pub per_page: u32,
    pub page: u32,
    pub status: String,
    pub orderby: String,
    pub order: String,
    /// Category ids; a record matches if it has any of them
    pub categories: Vec<u64>,
    /// Tag ids; a record matches if it has any of them
    pub tags: Vec<u64>,
    pub search: Option<String>,
}

impl Default for PracticeQuery {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            page: 1,
            status: "publish".to_string(),
            orderby: "date".to_string(),
            order: "desc".to_string(),
            categories: Vec::new(),
            tags: Vec::new(),
            search: None,
        }
    }
}

impl PracticeQuery {
    /// Same query, different page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Query string pairs, always embedding media and terms
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", self.per_page.clamp(1, MAX_PER_PAGE).to_string()),
            ("page", self.page.max(1).to_string()),
            ("status", self.status.clone()),
            ("orderby", self.orderby.clone()),
            ("order", self.order.clone()),
            ("_embed", "1".to_string()),
        ];

        if !self.categories.is_empty() {
            params.push((CATEGORY_TAXONOMY, join_ids(&self.categories)));
        }
        if !self.tags.is_empty() {
            params.push((TAG_TAXONOMY, join_ids(&self.tags)));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("search", search.to_string()));
        }

        params
    }
}

/// Comma-joined id list as the CMS expects for `include` and taxonomy filters
pub fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_default_params() {
        let params = PracticeQuery::default().to_params();
        assert_eq!(param(&params, "per_page"), Some("12"));
        assert_eq!(param(&params, "page"), Some("1"));
        assert_eq!(param(&params, "status"), Some("publish"));
        assert_eq!(param(&params, "orderby"), Some("date"));
        assert_eq!(param(&params, "order"), Some("desc"));
        assert_eq!(param(&params, "_embed"), Some("1"));
        assert_eq!(param(&params, "category-practices"), None);
        assert_eq!(param(&params, "search"), None);
    }

    #[test]
    fn test_filters_are_comma_joined() {
        let query = PracticeQuery {
            categories: vec![29, 31],
            tags: vec![4],
            search: Some("soledad".to_string()),
            ..Default::default()
        };
        let params = query.to_params();
        assert_eq!(param(&params, "category-practices"), Some("29,31"));
        assert_eq!(param(&params, "tags-practices"), Some("4"));
        assert_eq!(param(&params, "search"), Some("soledad"));
    }

    #[test]
    fn test_per_page_clamped() {
        let query = PracticeQuery {
            per_page: 500,
            page: 0,
            ..Default::default()
        };
        let params = query.to_params();
        assert_eq!(param(&params, "per_page"), Some("100"));
        assert_eq!(param(&params, "page"), Some("1"));
    }

    #[test]
    fn test_blank_search_omitted() {
        let query = PracticeQuery {
            search: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(param(&query.to_params(), "search"), None);
    }
}
