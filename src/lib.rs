pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod refresh;
pub mod scraper;

use std::sync::Arc;
use cache::QuizCache;
use config::Config;

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cache: Arc<QuizCache>,
}
