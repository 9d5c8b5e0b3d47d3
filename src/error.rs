//! Error types for goods-search.
//!
//! Each variant maps to the status code and caller-facing message carried in
//! a `SearchResult`; the `Display` text is for logs only.

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The keyword is empty once spaces are removed.
    #[error("keyword missing")]
    KeywordMissing,

    /// The engine call failed (transport, HTTP status or response body).
    #[error("query failed: {0}")]
    Engine(String),

    /// A branch did not finish before the search deadline.
    #[error("query timed out after {0:?}")]
    Timeout(Duration),

    /// The engine client could not be built.
    #[error("client construction failed: {0}")]
    Construction(String),
}

impl SearchError {
    /// Status code reported in `SearchResult::code`
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Construction(_) => 500,
            _ => 400,
        }
    }

    /// Message reported in `SearchResult::msg`
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::KeywordMissing => "keyword missing",
            Self::Engine(_) => "query failed",
            Self::Timeout(_) => "query timed out",
            Self::Construction(_) => "search backend unavailable",
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Engine(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
