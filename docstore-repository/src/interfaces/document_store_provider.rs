//! Document store provider trait definition.
//!
//! This module defines the abstract interface for document store operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch,
//! in-memory fakes for tests).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::DocumentStoreError;
use crate::types::BulkIndexSummary;
use docstore_shared::{Document, Fields, IndexSpec, SearchQuery, SearchResponse};

/// Abstracts the underlying document search service.
///
/// Every method is a single round trip to the service. Implementations are
/// injected into `DocumentStoreClient`, which adds validation, deadlines and
/// logging on top; providers only translate calls and classify failures.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` so one provider can serve
/// concurrent calls from many tasks.
///
/// # Error Handling
///
/// Service rejections are classified into `DocumentStoreError` kinds. Transport
/// failures are reported as `ConnectionError`.
#[async_trait]
pub trait DocumentStoreProvider: Send + Sync {
    /// Liveness probe.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The service answered the probe successfully
    /// * `Ok(false)` - The service answered with a failure status
    /// * `Err(DocumentStoreError)` - The probe could not be sent
    async fn ping(&self) -> Result<bool, DocumentStoreError>;

    /// Fetch cluster name and version information.
    async fn cluster_info(&self) -> Result<Value, DocumentStoreError>;

    /// Create an index with the given mapping.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(DocumentStoreError::IndexCreationError)` - If the index already exists
    ///   or the service rejected the mapping
    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DocumentStoreError>;

    /// Delete an index and all of its documents.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was deleted
    /// * `Err(DocumentStoreError::NotFound)` - If the index does not exist
    async fn delete_index(&self, index: &str) -> Result<(), DocumentStoreError>;

    /// Check whether an index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, DocumentStoreError>;

    /// Make all prior writes to the index visible to search.
    async fn refresh_index(&self, index: &str) -> Result<(), DocumentStoreError>;

    /// Index a single document, replacing any document with the same id.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The id of the stored document (service-assigned if the
    ///   document had none)
    /// * `Err(DocumentStoreError::IndexingError)` - If the service rejected it
    async fn index_document(
        &self,
        index: &str,
        document: &Document,
    ) -> Result<String, DocumentStoreError>;

    /// Index many documents in one request.
    ///
    /// Per-item failures are reported in the summary. Only failures of the
    /// request as a whole are returned as `Err`.
    async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkIndexSummary, DocumentStoreError>;

    /// Fetch a document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(Document)` - The stored document with its id
    /// * `Err(DocumentStoreError::NotFound)` - If the document or index is absent
    async fn get_document(&self, index: &str, id: &str) -> Result<Document, DocumentStoreError>;

    /// Merge `fields` into an existing document.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was updated
    /// * `Err(DocumentStoreError::NotFound)` - If the document does not exist
    /// * `Err(DocumentStoreError::UpdateError)` - For any other rejection
    async fn update_document(
        &self,
        index: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError>;

    /// Delete a document.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted
    /// * `Err(DocumentStoreError::NotFound)` - If the document does not exist
    /// * `Err(DocumentStoreError::DeleteError)` - For any other rejection
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), DocumentStoreError>;

    /// Execute a search and return the service's result set unmodified.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - The raw result set
    /// * `Err(DocumentStoreError::QueryError)` - If the query is malformed
    /// * `Err(DocumentStoreError::NotFound)` - If the index does not exist
    async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResponse, DocumentStoreError>;

    /// Count documents in the index, optionally restricted by a query.
    async fn count_documents(
        &self,
        index: &str,
        query: Option<&SearchQuery>,
    ) -> Result<u64, DocumentStoreError>;
}
