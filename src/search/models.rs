//! Search request model

use serde::{Deserialize, Deserializer, Serialize};

/// A search request as received from a caller, before validation.
///
/// Field names match the query-string and JSON parameters of the HTTP API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchRequest {
    /// Search keyword; whitespace separates tokens in exact mode
    pub keyword: String,
    /// Sort code, see `SortOrder::from_code`
    pub sort: String,
    /// 1-based page, clamped to at least 1
    #[serde(deserialize_with = "lenient_int")]
    pub from: i64,
    /// Page size, 1..=50 by default, otherwise the default size
    #[serde(deserialize_with = "lenient_int")]
    pub size: i64,
    /// Exclusive lower bound on the price after coupon
    pub min_price: Option<String>,
    /// Inclusive upper bound; the price filter applies only when set
    pub max_price: Option<String>,
    /// Restrict the search to one source index
    pub es_index: Option<String>,
    /// Non-zero disables the fuzzy recommendation fallback
    #[serde(deserialize_with = "lenient_int")]
    pub recommend: i64,
}

/// Accept numbers or numeric strings; blank, null or non-numeric values read
/// as 0 so they fall through to the paging defaults.
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(n)) => n,
        Some(Raw::Float(f)) if f.is_finite() => f.trunc() as i64,
        Some(Raw::Text(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

impl SearchRequest {
    /// Create a request for a keyword with default paging and sort
    pub fn simple(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Default::default()
        }
    }

    pub fn with_sort(mut self, code: impl Into<String>) -> Self {
        self.sort = code.into();
        self
    }

    pub fn with_page(mut self, from: i64) -> Self {
        self.from = from;
        self
    }

    pub fn with_size(mut self, size: i64) -> Self {
        self.size = size;
        self
    }

    pub fn with_price_range(mut self, min: impl Into<String>, max: impl Into<String>) -> Self {
        self.min_price = Some(min.into());
        self.max_price = Some(max.into());
        self
    }

    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.es_index = Some(index.into());
        self
    }

    /// Skip the fuzzy fallback search
    pub fn without_recommend(mut self) -> Self {
        self.recommend = 1;
        self
    }
}
