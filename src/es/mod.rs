//! Elasticsearch access
//!
//! Query DSL types, the `SearchBackend` trait and the HTTP client that
//! implements it.

mod client;
pub mod dsl;
mod response;
mod traits;

pub use client::EsClient;
pub use dsl::{BoolQuery, EsSearchRequest, Query, Sort, SortDirection};
pub use response::SearchHits;
pub use traits::SearchBackend;
