//! This module defines the core data structures shared across the document store.
//! It re-exports specific types like `Document` and `SearchResponse`.

pub mod document;
pub mod index_spec;
pub mod search_query;
pub mod search_result;

pub use document::{Document, Fields};
pub use index_spec::IndexSpec;
pub use search_query::SearchQuery;
pub use search_result::{SearchHit, SearchResponse};
