//! Search orchestration module
//!
//! Runs the exact and fuzzy searches for a request concurrently and
//! returns the exact result when it found anything, else the fuzzy one.

mod executor;
mod models;

pub use executor::{merge, Search};
pub use models::*;
