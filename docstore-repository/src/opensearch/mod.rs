//! OpenSearch implementation of the document store provider.
//!
//! Elasticsearch speaks the same REST dialect for every operation used here.

mod provider;
mod responses;

pub use provider::OpenSearchProvider;
