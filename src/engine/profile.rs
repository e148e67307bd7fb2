use crate::models::HistoryEntry;

use super::index::{CategoryIndex, CategoryVector};

/// Weight of a watched item that was neither rated nor liked
const WATCHED_WEIGHT: f64 = 0.3;
/// Weight of a liked but unrated item
const LIKED_WEIGHT: f64 = 0.5;

/// How strongly one history entry speaks for its categories.
///
/// A 1-5 rating maps linearly onto [0, 1]. Ratings outside that range are
/// not validated and go through the same formula.
pub fn entry_weight(entry: &HistoryEntry) -> f64 {
    match (entry.rating, entry.liked) {
        (Some(rating), _) => (f64::from(rating) - 1.0) / 4.0,
        (None, Some(true)) => LIKED_WEIGHT,
        _ => WATCHED_WEIGHT,
    }
}

/// Averages the weighted category vectors of a history into a preference
/// profile.
///
/// The sum is divided by the number of entries, so entries without known
/// categories still dilute the profile.
pub fn build_profile(history: &[HistoryEntry], index: &CategoryIndex) -> CategoryVector {
    if history.is_empty() {
        return CategoryVector::zeros(index.len());
    }

    history
        .iter()
        .fold(CategoryVector::zeros(index.len()), |profile, entry| {
            profile.add_scaled(&index.vectorize(&entry.categories), entry_weight(entry))
        })
        .scale(1.0 / history.len() as f64)
}
