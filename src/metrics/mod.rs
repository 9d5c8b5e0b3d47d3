//! Metrics collection module
//!
//! Counts requests, merge outcomes and per-branch engine health.

use crate::query::SearchMode;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Counters for one search branch
#[derive(Debug, Default)]
struct BranchCounters {
    searches: AtomicU64,
    successes: AtomicU64,
    errors: AtomicU64,
    timeouts: AtomicU64,
    total_time_ms: AtomicU64,
}

impl BranchCounters {
    fn snapshot(&self) -> BranchStats {
        let searches = self.searches.load(Ordering::Relaxed);
        let successes = self.successes.load(Ordering::Relaxed);
        let errors = self.errors.load(Ordering::Relaxed);
        let timeouts = self.timeouts.load(Ordering::Relaxed);
        let total_time = self.total_time_ms.load(Ordering::Relaxed);

        let finished = successes + errors + timeouts;
        BranchStats {
            searches,
            successes,
            errors,
            timeouts,
            avg_response_time: (successes > 0).then(|| total_time / successes),
            reliability: if finished == 0 {
                100.0
            } else {
                (successes as f64 / finished as f64) * 100.0
            },
        }
    }
}

/// Global metrics collector
#[derive(Debug, Default)]
pub struct Metrics {
    total_searches: AtomicU64,
    rejected: AtomicU64,
    exact_hits: AtomicU64,
    recommend_fallbacks: AtomicU64,
    empty_results: AtomicU64,
    cache_hits: AtomicU64,
    exact: BranchCounters,
    fuzzy: BranchCounters,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn branch(&self, mode: SearchMode) -> &BranchCounters {
        match mode {
            SearchMode::Exact => &self.exact,
            SearchMode::Fuzzy => &self.fuzzy,
        }
    }

    pub fn inc_search(&self) {
        self.total_searches.fetch_add(1, Ordering::Relaxed);
    }

    /// A request failed validation before reaching the engine
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Record which branch's result was returned
    pub fn record_outcome(&self, exact_won: bool, empty: bool) {
        if exact_won {
            self.exact_hits.fetch_add(1, Ordering::Relaxed);
        } else if !empty {
            self.recommend_fallbacks.fetch_add(1, Ordering::Relaxed);
        }
        if empty {
            self.empty_results.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_branch_search(&self, mode: SearchMode) {
        self.branch(mode).searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self, mode: SearchMode, elapsed: Duration) {
        let branch = self.branch(mode);
        branch.successes.fetch_add(1, Ordering::Relaxed);
        branch
            .total_time_ms
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_error(&self, mode: SearchMode) {
        self.branch(mode).errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self, mode: SearchMode) {
        self.branch(mode).timeouts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_total_searches(&self) -> u64 {
        self.total_searches.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            total_searches: self.total_searches.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            exact_hits: self.exact_hits.load(Ordering::Relaxed),
            recommend_fallbacks: self.recommend_fallbacks.load(Ordering::Relaxed),
            empty_results: self.empty_results.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            exact: self.exact.snapshot(),
            fuzzy: self.fuzzy.snapshot(),
        }
    }
}

/// Statistics for one branch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchStats {
    pub searches: u64,
    pub successes: u64,
    pub errors: u64,
    pub timeouts: u64,
    /// Mean latency of successful calls in ms
    pub avg_response_time: Option<u64>,
    /// Percentage of finished calls that succeeded
    pub reliability: f64,
}

/// Point-in-time copy of all counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub total_searches: u64,
    pub rejected: u64,
    pub exact_hits: u64,
    pub recommend_fallbacks: u64,
    pub empty_results: u64,
    pub cache_hits: u64,
    pub exact: BranchStats,
    pub fuzzy: BranchStats,
}
