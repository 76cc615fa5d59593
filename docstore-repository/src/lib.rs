//! # Docstore Repository
//!
//! This crate provides the client for a document search service speaking the
//! Elasticsearch/OpenSearch REST dialect. It includes the error taxonomy, the
//! provider trait backends implement, a concrete implementation on top of the
//! `opensearch` crate, and the `DocumentStoreClient` façade applications use.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;
pub mod utils;

pub use config::{ClientConfig, Credentials};
pub use errors::DocumentStoreError;
pub use interfaces::DocumentStoreProvider;
pub use opensearch::OpenSearchProvider;
pub use service::DocumentStoreClient;
pub use types::{BulkIndexSummary, BulkItemResult};
pub use utils::{validate_document_id, validate_index_name};
