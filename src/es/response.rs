//! `_search` response parsing

use serde::Deserialize;
use serde_json::Value;

/// Hits returned by one `_search` call, with `_source` left untyped
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    /// Total matching documents (not just this page)
    pub total: u64,
    /// Engine-side processing time
    pub took_ms: u64,
    /// `_source` of every hit on this page, in rank order
    pub documents: Vec<Value>,
}

impl SearchHits {
    pub fn new(total: u64, documents: Vec<Value>) -> Self {
        Self {
            total,
            took_ms: 0,
            documents,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSearchResponse {
    #[serde(default)]
    took: u64,
    hits: RawHits,
}

#[derive(Debug, Deserialize)]
struct RawHits {
    #[serde(default)]
    total: Option<RawTotal>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// 7.x reports `{ "value": n, "relation": "eq" }`, 6.x a bare number
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTotal {
    Object { value: u64 },
    Count(u64),
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_source", default)]
    source: Option<Value>,
}

impl From<RawSearchResponse> for SearchHits {
    fn from(raw: RawSearchResponse) -> Self {
        let total = match raw.hits.total {
            Some(RawTotal::Object { value }) => value,
            Some(RawTotal::Count(n)) => n,
            None => raw.hits.hits.len() as u64,
        };
        Self {
            total,
            took_ms: raw.took,
            documents: raw.hits.hits.into_iter().filter_map(|h| h.source).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_v7_total() {
        let raw: RawSearchResponse = serde_json::from_value(json!({
            "took": 3,
            "hits": {
                "total": { "value": 42, "relation": "eq" },
                "hits": [
                    { "_index": "tbk_tb", "_source": { "goods_id": "1" } },
                    { "_index": "tbk_jd", "_source": { "goods_id": "2" } }
                ]
            }
        }))
        .unwrap();

        let hits = SearchHits::from(raw);
        assert_eq!(hits.total, 42);
        assert_eq!(hits.took_ms, 3);
        assert_eq!(hits.documents.len(), 2);
        assert_eq!(hits.documents[1]["goods_id"], json!("2"));
    }

    #[test]
    fn test_parse_v6_total_and_missing_source() {
        let raw: RawSearchResponse = serde_json::from_value(json!({
            "hits": { "total": 7, "hits": [ { "_id": "x" } ] }
        }))
        .unwrap();

        let hits = SearchHits::from(raw);
        assert_eq!(hits.total, 7);
        assert!(hits.is_empty());
    }
}
