use std::collections::HashSet;

use crate::models::{Category, Item};

use super::index::{CategoryIndex, CategoryVector};

/// Number of profile categories considered the user's main interests
pub const TOP_INTERESTS: usize = 3;
/// Popularity above which an item is called trending
pub const TRENDING_POPULARITY: f64 = 50.0;
/// Quality score from which an item is called highly rated
pub const HIGHLY_RATED_QUALITY: f64 = 7.5;

pub const REASON_SEPARATOR: &str = " • ";
pub const FALLBACK_EXPLANATION: &str = "Recommended based on your preferences";

/// The `n` catalog categories with the highest profile weight, ties broken
/// by catalog order. Repeated ids are considered once.
pub fn top_categories<'a>(
    profile: &CategoryVector,
    index: &CategoryIndex,
    categories: &'a [Category],
    n: usize,
) -> Vec<&'a Category> {
    let mut seen = HashSet::new();
    let mut weighted: Vec<(&Category, f64)> = categories
        .iter()
        .filter(|c| seen.insert(c.id))
        .filter_map(|c| {
            let pos = index.position(c.id)?;
            profile.get(pos).map(|w| (c, *w))
        })
        .collect();

    // Stable, so equal weights keep catalog order
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));
    weighted.into_iter().take(n).map(|(c, _)| c).collect()
}

/// Explains recommendations against one user profile.
///
/// The user's top interests are resolved once and reused for every item.
#[derive(Debug, Clone)]
pub struct Explainer<'a> {
    /// Top interests, in catalog order
    interests: Vec<&'a Category>,
}

impl<'a> Explainer<'a> {
    pub fn new(profile: &CategoryVector, index: &CategoryIndex, categories: &'a [Category]) -> Self {
        let mut interests = top_categories(profile, index, categories, TOP_INTERESTS);
        interests.sort_by_key(|c| {
            categories
                .iter()
                .position(|other| other.id == c.id)
                .unwrap_or(usize::MAX)
        });
        Self { interests }
    }

    pub fn explain(&self, item: &Item) -> String {
        let mut reasons = Vec::new();

        let matching: Vec<&str> = self
            .interests
            .iter()
            .filter(|c| item.has_category_named(&c.name))
            .map(|c| c.name.as_str())
            .collect();
        if !matching.is_empty() {
            reasons.push(format!("Matches your interest in {}", matching.join(", ")));
        }

        if item.popularity > TRENDING_POPULARITY {
            reasons.push("Currently trending".to_string());
        }

        if item.quality_score.is_some_and(|q| q >= HIGHLY_RATED_QUALITY) {
            reasons.push("Highly rated".to_string());
        }

        if reasons.is_empty() {
            FALLBACK_EXPLANATION.to_string()
        } else {
            reasons.join(REASON_SEPARATOR)
        }
    }
}

/// One-off explanation of why `item` suits the profile
pub fn explain(
    item: &Item,
    profile: &CategoryVector,
    index: &CategoryIndex,
    categories: &[Category],
) -> String {
    Explainer::new(profile, index, categories).explain(item)
}
