//! Application state shared across handlers

use crate::cache::ResultCache;
use crate::config::Settings;
use crate::es::SearchBackend;
use crate::metrics::Metrics;
use crate::query::QueryBuilder;
use crate::search::Search;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Global settings
    pub settings: Arc<Settings>,
    /// Engine backend, also used for health checks
    pub backend: Arc<dyn SearchBackend>,
    /// Search orchestrator
    pub search: Arc<Search>,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    /// Wire the orchestrator up from settings and a backend
    pub fn new(settings: Settings, backend: Arc<dyn SearchBackend>) -> Self {
        let metrics = Arc::new(Metrics::new());
        let builder = QueryBuilder::new(settings.indices.clone())
            .with_min_score(settings.search.min_score)
            .with_page_limits(settings.search.page_limits());

        let mut search = Search::new(backend.clone(), builder)
            .with_timeout(settings.search.branch_timeout())
            .with_metrics(metrics.clone());
        if let Some(cache) = ResultCache::from_settings(&settings.cache) {
            search = search.with_cache(cache);
        }

        Self {
            settings: Arc::new(settings),
            backend,
            search: Arc::new(search),
            metrics,
        }
    }
}
