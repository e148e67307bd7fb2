use std::collections::HashSet;

use crate::models::{Category, HistoryEntry, Item, RecommendationResult};

use super::explain::Explainer;
use super::index::CategoryIndex;
use super::profile::build_profile;
use super::scorer::{self, PopularityRange};

/// Number of recommendations returned when the caller does not ask otherwise
pub const DEFAULT_TOP_N: usize = 10;

/// Explanation attached to popularity-only recommendations
pub const COLD_START_EXPLANATION: &str = "Popular right now";

/// Ranks `candidates` for a user with the given watch history.
///
/// Candidates the user has already watched are never returned. Without any
/// history, candidates are ranked purely by popularity.
pub fn recommend(
    history: &[HistoryEntry],
    candidates: &[Item],
    categories: &[Category],
    top_n: usize,
) -> Vec<RecommendationResult> {
    if candidates.is_empty() || top_n == 0 {
        return Vec::new();
    }

    let index = CategoryIndex::build(categories);
    let watched: HashSet<i64> = history.iter().map(|entry| entry.id).collect();
    let unwatched = candidates.iter().filter(|item| !watched.contains(&item.id));

    if history.is_empty() {
        tracing::debug!(candidates = candidates.len(), top_n, "Cold start, ranking by popularity");
        return cold_start(unwatched, top_n);
    }

    let profile = build_profile(history, &index);
    let range = PopularityRange::from_positive(candidates.iter().map(|item| item.popularity));
    let explainer = Explainer::new(&profile, &index, categories);

    tracing::debug!(
        history = history.len(),
        candidates = candidates.len(),
        categories = index.len(),
        min_popularity = range.min,
        max_popularity = range.max,
        "Scoring candidates against user profile"
    );

    let mut scored: Vec<RecommendationResult> = unwatched
        .map(|item| {
            let item_vector = index.vectorize(&item.categories);
            RecommendationResult {
                item: item.clone(),
                score: scorer::score(
                    &item_vector,
                    &profile,
                    item.popularity,
                    item.quality_score,
                    range,
                ),
                explanation: explainer.explain(item),
            }
        })
        .collect();

    // Stable: equal scores keep candidate order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(top_n);
    scored
}

/// Popularity ranking on the fixed default range rather than the
/// candidate-derived one.
fn cold_start<'a>(
    candidates: impl Iterator<Item = &'a Item>,
    top_n: usize,
) -> Vec<RecommendationResult> {
    let mut popular: Vec<&Item> = candidates.collect();
    popular.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));

    let range = PopularityRange::default();
    popular
        .into_iter()
        .take(top_n)
        .map(|item| RecommendationResult {
            item: item.clone(),
            score: range.normalize(item.popularity),
            explanation: COLD_START_EXPLANATION.to_string(),
        })
        .collect()
}
