//! Result types and formatting
//!
//! `CommonResult` is the listing shape stored in every source index;
//! `SearchResult` is what callers receive.

mod format;
mod types;

pub use format::{format_hits, total_pages};
pub use types::*;
