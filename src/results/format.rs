//! Turning engine hits into a `SearchResult`

use super::types::{CommonResult, SearchResult};
use crate::es::SearchHits;
use crate::query::{NormalizedRequest, SearchMode};
use tracing::warn;

/// Build the result for one branch from its page of hits.
///
/// Documents that do not deserialize into `CommonResult` are skipped.
pub fn format_hits(hits: SearchHits, request: &NormalizedRequest, mode: SearchMode) -> SearchResult {
    let mut result = SearchResult::empty(request.page, request.size);
    result.total = hits.total;
    result.total_page = total_pages(hits.total, request.size);
    if mode == SearchMode::Fuzzy {
        result.is_recommend = 1;
    }

    result.data = hits
        .documents
        .into_iter()
        .filter_map(|doc| match serde_json::from_value::<CommonResult>(doc) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping malformed {} hit: {}", mode.as_str(), e);
                None
            }
        })
        .collect();

    result
}

/// Number of pages needed for `total` hits at `size` per page
pub fn total_pages(total: u64, size: u32) -> u64 {
    if size == 0 {
        return 0;
    }
    (total as f64 / size as f64).ceil() as u64
}
