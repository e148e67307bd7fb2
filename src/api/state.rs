use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::models::WatchHistory;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// The current user's watch history, held in memory only
    pub history: Arc<RwLock<WatchHistory>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    /// Creates state with an empty watch history
    pub fn new(config: Config) -> Self {
        Self::with_history(config, WatchHistory::new())
    }

    pub fn with_history(config: Config, history: WatchHistory) -> Self {
        Self {
            config: Arc::new(config),
            history: Arc::new(RwLock::new(history)),
        }
    }
}
