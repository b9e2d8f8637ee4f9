use std::sync::Arc;

use crate::config::Config;
use crate::db::Cache;
use crate::recs::{RecommendationSink, VideoCatalog};

/// Ranking and lookup knobs carried into handlers
#[derive(Debug, Clone, Copy)]
pub struct RecSettings {
    /// Recommendations generated per video
    pub top_k: usize,
    /// Default lookup result size
    pub fetch_limit: usize,
    /// TTL for cached recommendation lists, in seconds
    pub cache_ttl_secs: u64,
}

impl RecSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            top_k: config.top_k,
            fetch_limit: config.fetch_limit,
            cache_ttl_secs: config.cache_ttl_secs,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn VideoCatalog>,
    pub sink: Arc<dyn RecommendationSink>,
    /// Lookup cache; `None` runs every lookup against the store
    pub cache: Option<Cache>,
    pub settings: RecSettings,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn VideoCatalog>,
        sink: Arc<dyn RecommendationSink>,
        cache: Option<Cache>,
        settings: RecSettings,
    ) -> Self {
        Self {
            catalog,
            sink,
            cache,
            settings,
        }
    }
}
