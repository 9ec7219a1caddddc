//! Text helpers for CMS-rendered fields
//!
//! WordPress returns titles with HTML entities and several practice fields
//! as HTML fragments.

use once_cell::sync::Lazy;
use regex::Regex;

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

static YOUTUBE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#,
    )
    .expect("valid youtube regex")
});

static VIMEO_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"vimeo\.com/(?:video/)?(\d+)").expect("valid vimeo regex"));

/// Entities WordPress emits in rendered titles
const HTML_ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&nbsp;", " "),
    ("&#8211;", "\u{2013}"),
    ("&#8212;", "\u{2014}"),
    ("&#8216;", "\u{2018}"),
    ("&#8217;", "\u{2019}"),
    ("&#8220;", "\u{201C}"),
    ("&#8221;", "\u{201D}"),
];

/// Length of the summary used for page descriptions
pub const SUMMARY_LENGTH: usize = 160;

/// Replace the known WordPress entities with their characters
pub fn decode_html_entities(text: &str) -> String {
    let mut result = text.to_string();
    for (entity, ch) in HTML_ENTITIES {
        if result.contains(entity) {
            result = result.replace(entity, ch);
        }
    }
    result
}

/// Remove HTML tags and surrounding whitespace
pub fn strip_html(html: &str) -> String {
    HTML_TAG.replace_all(html, "").trim().to_string()
}

/// Cut `text` to at most `max_chars` characters, appending `...` when cut
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// Plain-text description for a practice: its objective, or a generic line
pub fn summary(title: &str, objective_html: &str) -> String {
    let plain = strip_html(objective_html);
    if plain.is_empty() {
        return format!("Buena práctica: {}", title);
    }
    plain.chars().take(SUMMARY_LENGTH).collect()
}

/// Extract the 11-character YouTube video id from a watch/embed/short URL
pub fn youtube_id(url: &str) -> Option<String> {
    YOUTUBE_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Extract the numeric Vimeo video id
pub fn vimeo_id(url: &str) -> Option<String> {
    VIMEO_ID
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Embeddable player URL for a YouTube or Vimeo link
pub fn video_embed_url(url: &str) -> Option<String> {
    if let Some(id) = youtube_id(url) {
        return Some(format!("https://www.youtube.com/embed/{}", id));
    }
    vimeo_id(url).map(|id| format!("https://player.vimeo.com/video/{}", id))
}

/// Progress-bar percentage for a free-text transferability level
pub fn transferability_percentage(level: &str) -> u8 {
    let level = level.to_lowercase();
    if level.contains("alto") || level.contains("alta") {
        100
    } else if level.contains("medio") || level.contains("media") {
        66
    } else if level.contains("bajo") || level.contains("baja") {
        33
    } else {
        50
    }
}
