//! # Docstore Shared
//!
//! This crate defines the data structures passed between the document store
//! client, its backend providers and the applications built on top of them.
//! Documents, index specifications, query bodies and search results all live
//! here so that fakes and real backends agree on one vocabulary.

pub mod types;

pub use types::document::{Document, Fields};
pub use types::index_spec::IndexSpec;
pub use types::search_query::SearchQuery;
pub use types::search_result::{SearchHit, SearchResponse};
