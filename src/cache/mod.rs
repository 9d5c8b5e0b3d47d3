//! Result cache
//!
//! Successful search results keyed by their normalized request.

use crate::config::CacheSettings;
use crate::query::NormalizedRequest;
use crate::results::SearchResult;
use moka::future::Cache;
use std::time::Duration;

/// Cache for search results
#[derive(Clone)]
pub struct ResultCache {
    cache: Cache<String, SearchResult>,
}

impl ResultCache {
    /// Create a new result cache with specified TTL
    pub fn new(ttl_seconds: u64, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(Duration::from_secs(ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    /// `None` when caching is disabled
    pub fn from_settings(settings: &CacheSettings) -> Option<Self> {
        settings
            .enabled
            .then(|| Self::new(settings.ttl, settings.max_capacity))
    }

    pub async fn get(&self, request: &NormalizedRequest) -> Option<SearchResult> {
        self.cache.get(&cache_key(request)).await
    }

    /// Store a result; failures are never cached
    pub async fn insert(&self, request: &NormalizedRequest, result: SearchResult) {
        if result.is_success() {
            self.cache.insert(cache_key(request), result).await;
        }
    }

    /// Clear the entire cache
    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(60, 10_000)
    }
}

/// Generate a cache key for a normalized request
pub fn cache_key(request: &NormalizedRequest) -> String {
    use sha2::{Digest, Sha256};

    let mut hasher = Sha256::new();
    for part in [
        request.keyword.as_str(),
        request.sort.field().0,
        request.sort.field().1.as_str(),
        request.min_price.as_deref().unwrap_or(""),
        request.max_price.as_deref().unwrap_or(""),
        request.index.as_deref().unwrap_or(""),
    ] {
        hasher.update(part.as_bytes());
        hasher.update([0u8]);
    }
    hasher.update(request.page.to_be_bytes());
    hasher.update(request.size.to_be_bytes());
    hasher.update([u8::from(request.fuzzy_fallback)]);

    format!("{:x}", hasher.finalize())
}
