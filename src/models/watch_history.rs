use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Category;

/// A past interaction of the current user with an item.
///
/// Fields are a snapshot taken when the item was watched, not a live
/// reference into the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Explicit 1-5 star rating
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub liked: Option<bool>,
    #[serde(default = "Utc::now", alias = "viewedAt")]
    pub observed_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an unrated entry observed now
    pub fn new(id: i64, categories: Vec<Category>) -> Self {
        Self {
            id,
            categories,
            rating: None,
            liked: None,
            observed_at: Utc::now(),
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_liked(mut self, liked: bool) -> Self {
        self.liked = Some(liked);
        self
    }

    pub fn observed_at(mut self, at: DateTime<Utc>) -> Self {
        self.observed_at = at;
        self
    }

    /// Overlays the fields present in `update` onto this entry
    fn merge(&mut self, update: HistoryEntry) {
        if !update.categories.is_empty() {
            self.categories = update.categories;
        }
        self.rating = update.rating.or(self.rating);
        self.liked = update.liked.or(self.liked);
        self.observed_at = update.observed_at;
    }
}

/// The current user's watch history, in insertion order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WatchHistory {
    entries: Vec<HistoryEntry>,
}

impl WatchHistory {
    /// Creates an empty history
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Records a watch. An entry for the same item is updated in place,
    /// keeping its position; otherwise the entry is appended.
    pub fn upsert(&mut self, entry: HistoryEntry) -> &HistoryEntry {
        match self.entries.iter().position(|e| e.id == entry.id) {
            Some(idx) => {
                self.entries[idx].merge(entry);
                &self.entries[idx]
            }
            None => {
                self.entries.push(entry);
                let last = self.entries.len() - 1;
                &self.entries[last]
            }
        }
    }

    /// Sets the rating of a watched item. Ratings of 4 and above count as liked.
    pub fn update_rating(&mut self, id: i64, rating: u8) -> Option<&HistoryEntry> {
        let entry = self.entries.iter_mut().find(|e| e.id == id)?;
        entry.rating = Some(rating);
        entry.liked = Some(rating >= 4);
        Some(&*entry)
    }

    /// Removes an item from the history, returning whether it was present
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }
}

impl From<Vec<HistoryEntry>> for WatchHistory {
    fn from(entries: Vec<HistoryEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            history.upsert(entry);
        }
        history
    }
}
