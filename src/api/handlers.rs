use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::HistoryEntry;
use crate::services::{
    analytics::{self, HistoryAnalytics},
    recommendations::{self, validate_rating, RecommendationRequest, RecommendationResponse},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateRatingRequest {
    pub rating: u8,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Rank candidates for the current user
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    // Snapshot so scoring runs without holding the lock
    let stored = state.history.read().await.clone();
    let config = state.config.clone();

    let response = tokio::task::spawn_blocking(move || {
        recommendations::get_recommendations(request, &stored, &config)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(Json(response))
}

/// Get the watch history
pub async fn get_history(State(state): State<AppState>) -> Json<Vec<HistoryEntry>> {
    let history = state.history.read().await;
    Json(history.entries().to_vec())
}

/// Record a watched item, merging into an existing entry for the same item
pub async fn add_history_entry(
    State(state): State<AppState>,
    Json(entry): Json<HistoryEntry>,
) -> AppResult<(StatusCode, Json<HistoryEntry>)> {
    if let Some(rating) = entry.rating {
        validate_rating(rating)?;
    }

    let mut history = state.history.write().await;
    let stored = history.upsert(entry).clone();
    tracing::info!(id = stored.id, total = history.len(), "History entry recorded");

    Ok((StatusCode::CREATED, Json(stored)))
}

/// Rate a watched item
pub async fn update_rating(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRatingRequest>,
) -> AppResult<Json<HistoryEntry>> {
    validate_rating(request.rating)?;

    let mut history = state.history.write().await;
    let entry = history
        .update_rating(id, request.rating)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("No history entry for item {}", id)))?;
    tracing::info!(id, rating = request.rating, "Rating updated");

    Ok(Json(entry))
}

/// Forget a watched item
pub async fn remove_history_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let mut history = state.history.write().await;
    if history.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No history entry for item {}", id)))
    }
}

/// Statistics over the watch history
pub async fn get_analytics(State(state): State<AppState>) -> Json<HistoryAnalytics> {
    let history = state.history.read().await;
    Json(analytics::summarize(history.entries()))
}
