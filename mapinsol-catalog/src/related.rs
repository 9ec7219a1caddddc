//! Related-practice scoring
//!
//! Score = 3 per shared category + 2 per shared tag + 5 if the other
//! practice is featured. Zero-score candidates are dropped; ties keep the
//! order of the candidate list.

use serde::Serialize;

use crate::models::Practice;

/// Related practices shown on a detail view
pub const RELATED_LIMIT: usize = 3;

const CATEGORY_WEIGHT: u32 = 3;
const TAG_WEIGHT: u32 = 2;
const FEATURED_BONUS: u32 = 5;

/// A candidate with its relatedness score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPractice {
    pub score: u32,
    pub practice: Practice,
}

pub fn relatedness_score(current: &Practice, other: &Practice) -> u32 {
    let shared_categories = other
        .categories
        .iter()
        .filter(|c| current.categories.contains(c))
        .count() as u32;
    let shared_tags = other.tags.iter().filter(|t| current.tags.contains(t)).count() as u32;

    let mut score = shared_categories * CATEGORY_WEIGHT + shared_tags * TAG_WEIGHT;
    if other.featured {
        score += FEATURED_BONUS;
    }
    score
}

/// Up to `top_n` practices most related to `current`, best first
pub fn related_practices(current: &Practice, all: &[Practice], top_n: usize) -> Vec<ScoredPractice> {
    let mut scored: Vec<ScoredPractice> = all
        .iter()
        .filter(|p| p.id != current.id)
        .map(|p| ScoredPractice {
            score: relatedness_score(current, p),
            practice: p.clone(),
        })
        .filter(|s| s.score > 0)
        .collect();

    // sort_by is stable
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_n);
    scored
}
