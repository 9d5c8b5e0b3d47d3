//! The seam between the orchestrator and the search engine

use super::dsl::EsSearchRequest;
use super::response::SearchHits;
use crate::error::Result;
use async_trait::async_trait;

/// Anything that can execute a built `_search` request.
///
/// `EsClient` is the production implementation; tests substitute
/// in-memory backends.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Execute a search and return the page of hits
    async fn search(&self, request: &EsSearchRequest) -> Result<SearchHits>;

    /// Cheap reachability check used by the health endpoint
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
