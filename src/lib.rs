//! Goods-Search: keyword search over a multi-marketplace goods catalog
//!
//! Listings from three marketplaces live in separate Elasticsearch indices
//! sharing one document shape. Each request runs an exact phrase search and,
//! unless disabled, a fuzzy recommendation search at the same time; the
//! exact result is returned whenever it found anything.

pub mod cache;
pub mod config;
pub mod error;
pub mod es;
pub mod metrics;
pub mod providers;
pub mod query;
pub mod results;
pub mod search;
pub mod web;

pub use config::Settings;
pub use error::{Result, SearchError};
pub use es::{EsClient, SearchBackend};
pub use results::{CommonResult, SearchResult};
pub use search::{Search, SearchRequest};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default deadline for a search, in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;
