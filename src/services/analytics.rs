use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::HistoryEntry;

/// How many categories the top-categories breakdown keeps
pub const TOP_CATEGORY_LIMIT: usize = 10;
/// How many of the most recent months the timeline keeps
pub const TIMELINE_MONTHS: usize = 12;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyCount {
    /// `YYYY-MM`
    pub month: String,
    pub count: usize,
}

/// Summary statistics over the user's watch history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryAnalytics {
    pub total_watched: usize,
    pub rated_count: usize,
    /// Mean of the explicit ratings, to one decimal
    pub average_rating: Option<f64>,
    pub top_categories: Vec<CategoryCount>,
    /// Count of entries per star rating, 1 through 5
    pub ratings_distribution: BTreeMap<u8, usize>,
    /// Watches per month, oldest first
    pub monthly_watches: Vec<MonthlyCount>,
}

/// Computes dashboard statistics for a watch history
pub fn summarize(history: &[HistoryEntry]) -> HistoryAnalytics {
    let ratings: Vec<u8> = history.iter().filter_map(|entry| entry.rating).collect();

    let average_rating = if ratings.is_empty() {
        None
    } else {
        let mean = ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64;
        Some((mean * 10.0).round() / 10.0)
    };

    let mut ratings_distribution: BTreeMap<u8, usize> = (1..=5).map(|star| (star, 0)).collect();
    for rating in &ratings {
        if let Some(count) = ratings_distribution.get_mut(rating) {
            *count += 1;
        }
    }

    HistoryAnalytics {
        total_watched: history.len(),
        rated_count: ratings.len(),
        average_rating,
        top_categories: top_categories(history),
        ratings_distribution,
        monthly_watches: monthly_watches(history),
    }
}

/// Category names by number of watched entries carrying them; ties keep
/// first-seen order
fn top_categories(history: &[HistoryEntry]) -> Vec<CategoryCount> {
    let mut counts: Vec<CategoryCount> = Vec::new();
    for category in history.iter().flat_map(|entry| entry.categories.iter()) {
        match counts.iter_mut().find(|c| c.name == category.name) {
            Some(existing) => existing.count += 1,
            None => counts.push(CategoryCount {
                name: category.name.clone(),
                count: 1,
            }),
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_CATEGORY_LIMIT);
    counts
}

fn monthly_watches(history: &[HistoryEntry]) -> Vec<MonthlyCount> {
    let mut by_month: BTreeMap<String, usize> = BTreeMap::new();
    for entry in history {
        *by_month
            .entry(entry.observed_at.format("%Y-%m").to_string())
            .or_default() += 1;
    }

    let skip = by_month.len().saturating_sub(TIMELINE_MONTHS);
    by_month
        .into_iter()
        .skip(skip)
        .map(|(month, count)| MonthlyCount { month, count })
        .collect()
}
