//! Pagination utilities for practice listings
//!
//! Listings are filtered in memory and then cut into pages of 12.

use serde::{Serialize, Serializer};

/// Page size constant for all listings
pub const PAGE_SIZE: usize = 12;

/// Pages shown on each side of the current one
const WINDOW_DELTA: usize = 2;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Index of the first item on the page
    pub offset: usize,
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]
///
/// # Examples
/// ```
/// use mapinsol_catalog::pagination::calculate_pagination;
///
/// // 30 results = 3 pages (12 + 12 + 6)
/// let p = calculate_pagination(30, 2);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 12);
///
/// // Requesting out-of-bounds page gets clamped
/// let p = calculate_pagination(30, 99);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 24);
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: usize) -> Pagination {
    let total_pages = total_results.div_ceil(PAGE_SIZE);
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// Items on the page described by `pagination`
pub fn page_slice<'a, T>(items: &'a [T], pagination: &Pagination) -> &'a [T] {
    let start = pagination.offset.min(items.len());
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Entry in the page-number strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    /// One or more omitted pages
    Gap,
}

impl Serialize for PageLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageLink::Page(n) => serializer.serialize_u64(*n as u64),
            PageLink::Gap => serializer.serialize_str("..."),
        }
    }
}

/// Page-number strip: first, last, and pages within 2 of the current one
///
/// Empty when there is at most one page.
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    if total_pages <= 1 {
        return links;
    }

    for i in 1..=total_pages {
        let near = i + WINDOW_DELTA >= current && i <= current + WINDOW_DELTA;
        if i == 1 || i == total_pages || near {
            links.push(PageLink::Page(i));
        } else if links.last() != Some(&PageLink::Gap) {
            links.push(PageLink::Gap);
        }
    }

    links
}
