pub mod tmdb;

use crate::{errors::ReelError, types::SearchQuery};
use async_trait::async_trait;
use dyn_clone::DynClone;
use serde_json::Value;
use std::fmt::Debug;

pub use tmdb::TmdbProvider;

/// A trait for a remote multi-type media search.
#[async_trait]
pub trait CatalogProvider: Send + Sync + Debug + DynClone {
    /// Runs one search and returns the provider's payload untouched.
    async fn search(&self, query: &SearchQuery) -> Result<Value, ReelError>;
}

dyn_clone::clone_trait_object!(CatalogProvider);

/// Number of entries in a search payload's `results` array. A payload
/// without one counts as empty.
pub fn result_count(payload: &Value) -> usize {
    payload
        .get("results")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
