use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    engine,
    error::{AppError, AppResult},
    models::{Category, HistoryEntry, Item, RecommendationResult, WatchHistory},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Full known category catalog, in catalog order
    pub categories: Vec<Category>,
    pub candidates: Vec<Item>,
    /// Overrides the stored watch history when present
    #[serde(default)]
    pub history: Option<Vec<HistoryEntry>>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationResult>,
    /// True when the ranking had no history to work from
    pub cold_start: bool,
}

/// Generates personalized watch recommendations
///
/// Ranks the request's candidates against the user's watch history using
/// content-based filtering over categories, boosted by popularity and
/// quality. Uses the history supplied with the request, or `stored` when
/// the request carries none.
pub fn get_recommendations(
    request: RecommendationRequest,
    stored: &WatchHistory,
    config: &Config,
) -> AppResult<RecommendationResponse> {
    let top_n = request.top_n.unwrap_or(config.default_top_n);
    if top_n > config.max_top_n {
        return Err(AppError::InvalidInput(format!(
            "topN must be at most {}, got {}",
            config.max_top_n, top_n
        )));
    }

    if let Some(history) = &request.history {
        for rating in history.iter().filter_map(|entry| entry.rating) {
            validate_rating(rating)?;
        }
    }

    let history = request.history.as_deref().unwrap_or(stored.entries());

    tracing::info!(
        categories = request.categories.len(),
        candidates = request.candidates.len(),
        history = history.len(),
        top_n,
        "Generating recommendations"
    );

    let recommendations =
        engine::recommend(history, &request.candidates, &request.categories, top_n);

    tracing::info!(returned = recommendations.len(), "Recommendations generated");

    Ok(RecommendationResponse {
        recommendations,
        cold_start: history.is_empty(),
    })
}

/// Accepts star ratings from 1 to 5
pub fn validate_rating(rating: u8) -> AppResult<()> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "Rating must be between 1 and 5, got {}",
            rating
        )))
    }
}
