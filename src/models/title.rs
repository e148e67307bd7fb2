use serde::{Deserialize, Serialize};

/// A catalog category (genre). Identity is `id`; `name` is for display only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A candidate catalog entry (e.g. a movie) as supplied by the catalog client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Raw popularity figure, expected to be >= 0
    #[serde(default)]
    pub popularity: f64,
    /// Average audience rating on a 0-10 scale
    #[serde(default)]
    pub quality_score: Option<f64>,
}

impl Item {
    /// Returns true if any of this item's categories carries `name`
    pub fn has_category_named(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }
}

/// An item decorated with its recommendation score and explanation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    #[serde(flatten)]
    pub item: Item,
    pub score: f64,
    pub explanation: String,
}
