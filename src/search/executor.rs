//! Search execution and orchestration

use super::models::SearchRequest;
use crate::cache::ResultCache;
use crate::error::SearchError;
use crate::es::SearchBackend;
use crate::metrics::Metrics;
use crate::query::{clamp_page, NormalizedRequest, QueryBuilder, SearchMode};
use crate::results::{format_hits, SearchResult};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio::time::timeout_at;
use tracing::{debug, info, warn};

/// Runs the exact and fuzzy searches for a request and picks the result
pub struct Search {
    /// Engine the queries are sent to
    backend: Arc<dyn SearchBackend>,
    /// Turns normalized requests into engine queries
    builder: Arc<QueryBuilder>,
    /// Deadline shared by both branches
    branch_timeout: Duration,
    cache: Option<ResultCache>,
    metrics: Arc<Metrics>,
}

impl Search {
    pub fn new(backend: Arc<dyn SearchBackend>, builder: QueryBuilder) -> Self {
        Self {
            backend,
            builder: Arc::new(builder),
            branch_timeout: Duration::from_secs(crate::DEFAULT_TIMEOUT),
            cache: None,
            metrics: Arc::new(Metrics::new()),
        }
    }

    /// Set the deadline for both branches
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.branch_timeout = timeout;
        self
    }

    pub fn with_cache(mut self, cache: ResultCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Execute a search request.
    ///
    /// Always returns a well-formed result: validation and engine failures
    /// are reported through `code` and `msg`.
    pub async fn execute(&self, request: &SearchRequest) -> SearchResult {
        self.metrics.inc_search();

        let normalized = match self.builder.normalize(request) {
            Ok(n) => n,
            Err(e) => {
                debug!("Rejected search request: {}", e);
                self.metrics.record_rejected();
                let size = self.builder.page_limits().clamp_size(request.size);
                return SearchResult::failure(&e, clamp_page(request.from), size);
            }
        };

        if let Some(ref cache) = self.cache {
            if let Some(mut hit) = cache.get(&normalized).await {
                debug!("Cache hit for '{}'", normalized.keyword);
                self.metrics.record_cache_hit();
                hit.refresh_request_time();
                return hit;
            }
        }

        let start = Instant::now();
        let normalized = Arc::new(normalized);
        let deadline = tokio::time::Instant::now() + self.branch_timeout;

        let exact = self.spawn_branch(normalized.clone(), SearchMode::Exact);
        let fuzzy = normalized
            .fuzzy_fallback
            .then(|| self.spawn_branch(normalized.clone(), SearchMode::Fuzzy));

        let (exact, fuzzy) = tokio::join!(
            self.join_branch(exact, SearchMode::Exact, deadline, &normalized),
            async {
                match fuzzy {
                    Some(handle) => {
                        self.join_branch(handle, SearchMode::Fuzzy, deadline, &normalized)
                            .await
                    }
                    None => SearchResult::empty(normalized.page, normalized.size),
                }
            }
        );

        // an empty result after a failed or timed-out branch must not be cached
        let both_succeeded = exact.is_success() && fuzzy.is_success();
        let exact_won = !exact.is_empty();
        let result = merge(exact, fuzzy);
        self.metrics.record_outcome(exact_won, result.is_empty());

        info!(
            "Search '{}' returned {} items (total {}, recommend {}) in {:?}",
            normalized.keyword,
            result.data.len(),
            result.total,
            result.is_recommend,
            start.elapsed()
        );

        if let Some(ref cache) = self.cache {
            if both_succeeded {
                cache.insert(&normalized, result.clone()).await;
            }
        }

        result
    }

    fn spawn_branch(
        &self,
        request: Arc<NormalizedRequest>,
        mode: SearchMode,
    ) -> JoinHandle<SearchResult> {
        let backend = self.backend.clone();
        let builder = self.builder.clone();
        let metrics = self.metrics.clone();

        tokio::spawn(async move {
            run_branch(backend.as_ref(), &builder, &request, mode, &metrics).await
        })
    }

    /// Wait for a branch until the deadline; a late branch is aborted
    async fn join_branch(
        &self,
        mut handle: JoinHandle<SearchResult>,
        mode: SearchMode,
        deadline: tokio::time::Instant,
        request: &NormalizedRequest,
    ) -> SearchResult {
        match timeout_at(deadline, &mut handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                warn!("{} search task failed: {}", mode.as_str(), e);
                self.metrics.record_error(mode);
                let err = SearchError::Engine(e.to_string());
                SearchResult::failure(&err, request.page, request.size)
            }
            Err(_) => {
                handle.abort();
                warn!(
                    "{} search for '{}' timed out after {:?}",
                    mode.as_str(),
                    request.keyword,
                    self.branch_timeout
                );
                self.metrics.record_timeout(mode);
                let err = SearchError::Timeout(self.branch_timeout);
                SearchResult::failure(&err, request.page, request.size)
            }
        }
    }
}

/// Run one branch: build the query, call the engine and format the hits
async fn run_branch(
    backend: &dyn SearchBackend,
    builder: &QueryBuilder,
    request: &NormalizedRequest,
    mode: SearchMode,
    metrics: &Metrics,
) -> SearchResult {
    let es_request = builder.build(request, mode);
    metrics.record_branch_search(mode);

    debug!(
        "Running {} search on [{}]: {}",
        mode.as_str(),
        es_request.index_path(),
        es_request.body()
    );

    let start = Instant::now();
    match backend.search(&es_request).await {
        Ok(hits) => {
            let elapsed = start.elapsed();
            metrics.record_success(mode, elapsed);
            debug!(
                "{} search returned {} of {} hits in {:?} (engine {}ms)",
                mode.as_str(),
                hits.documents.len(),
                hits.total,
                elapsed,
                hits.took_ms
            );
            format_hits(hits, request, mode)
        }
        Err(e) => {
            warn!("{} search failed: {}", mode.as_str(), e);
            metrics.record_error(mode);
            SearchResult::failure(&e, request.page, request.size)
        }
    }
}

/// The exact result wins whenever it has items
pub fn merge(exact: SearchResult, fuzzy: SearchResult) -> SearchResult {
    if !exact.is_empty() {
        exact
    } else {
        fuzzy
    }
}
