mod title;
mod watch_history;

pub use title::{Category, Item, RecommendationResult};
pub use watch_history::{HistoryEntry, WatchHistory};
