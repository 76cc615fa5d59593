//! Document store client implementation.
//!
//! This module provides the main entry point for talking to the document
//! search service. Application code uses it to manage indexes, write documents
//! and run searches.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::{ClientConfig, DEFAULT_OPERATION_TIMEOUT};
use crate::errors::DocumentStoreError;
use crate::interfaces::DocumentStoreProvider;
use crate::opensearch::OpenSearchProvider;
use crate::types::{BulkIndexSummary, BulkItemResult};
use crate::utils::{validate_document_id, validate_index_name};
use docstore_shared::{Document, Fields, IndexSpec, SearchQuery, SearchResponse};

/// The main client for the document search service.
///
/// This is the high-level API that application code should use. It validates
/// input, enforces the operation deadline, logs every outcome and delegates to
/// a `DocumentStoreProvider` for the actual round trip. Failures are returned
/// to the caller unchanged; nothing is retried.
///
/// The client is cheap to clone and safe to share between tasks.
///
/// # Example
///
/// ```no_run
/// use docstore_repository::{ClientConfig, Credentials, DocumentStoreClient};
/// use docstore_shared::{Document, IndexSpec, SearchQuery};
/// use serde_json::json;
///
/// # async fn example() -> Result<(), docstore_repository::DocumentStoreError> {
/// let config = ClientConfig::new(Credentials::new("localhost", 9200, "elastic", "changeme"));
/// let client = DocumentStoreClient::connect(&config)?;
/// client.verify_connection().await?;
///
/// let mappings = json!({ "properties": { "title": { "type": "text" } } });
/// client.create_index(&IndexSpec::new("courses", mappings)).await?;
///
/// let doc = Document::from_value(None, json!({ "title": "Python Programming" })).unwrap();
/// client.index_document("courses", &doc).await?;
///
/// let results = client
///     .search("courses", &SearchQuery::match_field("title", "Python"))
///     .await?;
/// println!("{} hits", results.total());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DocumentStoreClient {
    provider: Arc<dyn DocumentStoreProvider>,
    operation_timeout: Option<Duration>,
    max_batch_size: Option<usize>,
}

impl DocumentStoreClient {
    /// Create a client for the configured service, backed by OpenSearch.
    ///
    /// No request is sent; call `verify_connection` to check reachability.
    pub fn connect(config: &ClientConfig) -> Result<Self, DocumentStoreError> {
        let provider = OpenSearchProvider::new(config)?;
        Ok(Self::with_config(Box::new(provider), config))
    }

    /// Create a client with the default deadline and no batch limit.
    ///
    /// # Arguments
    ///
    /// * `provider` - Any `DocumentStoreProvider`, e.g. `OpenSearchProvider` or
    ///   an in-memory fake
    pub fn new(provider: Box<dyn DocumentStoreProvider>) -> Self {
        Self {
            provider: Arc::from(provider),
            operation_timeout: Some(DEFAULT_OPERATION_TIMEOUT),
            max_batch_size: None,
        }
    }

    /// Create a client taking its deadline and batch limit from `config`.
    ///
    /// The credentials in `config` are not used; the provider is already bound.
    pub fn with_config(provider: Box<dyn DocumentStoreProvider>, config: &ClientConfig) -> Self {
        Self {
            provider: Arc::from(provider),
            operation_timeout: config.operation_timeout,
            max_batch_size: config.max_batch_size,
        }
    }

    /// A clone of this client whose operations use `timeout` as deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            operation_timeout: Some(timeout),
            ..self.clone()
        }
    }

    /// A clone of this client whose operations wait indefinitely.
    pub fn without_timeout(&self) -> Self {
        Self {
            operation_timeout: None,
            ..self.clone()
        }
    }

    /// A clone of this client with a different bulk batch limit.
    pub fn with_max_batch_size(&self, max_batch_size: Option<usize>) -> Self {
        Self {
            max_batch_size,
            ..self.clone()
        }
    }

    /// The deadline applied to each operation.
    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout
    }

    /// Run `operation` under the configured deadline.
    async fn run<T, F>(&self, operation: F) -> Result<T, DocumentStoreError>
    where
        F: Future<Output = Result<T, DocumentStoreError>>,
    {
        match self.operation_timeout {
            Some(deadline) => tokio::time::timeout(deadline, operation)
                .await
                .map_err(|_| DocumentStoreError::timeout(deadline.as_millis() as u64))?,
            None => operation.await,
        }
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), DocumentStoreError> {
        if let Some(max) = self.max_batch_size {
            if size > max {
                return Err(DocumentStoreError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Probe the service.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the service answered the probe
    /// * `Err(DocumentStoreError::ConnectionError)` - If it is unreachable or
    ///   answered with a failure
    /// * `Err(DocumentStoreError::Timeout)` - If the probe hit the deadline
    pub async fn verify_connection(&self) -> Result<(), DocumentStoreError> {
        let alive = self.run(self.provider.ping()).await.inspect_err(|e| {
            error!(error = %e, "Connection check failed");
        })?;

        if !alive {
            let e = DocumentStoreError::connection("liveness probe reported failure");
            error!(error = %e, "Connection check failed");
            return Err(e);
        }

        info!("Connected to document store");
        Ok(())
    }

    /// Fetch the service's name and version information, unmodified.
    pub async fn cluster_info(&self) -> Result<Value, DocumentStoreError> {
        self.run(self.provider.cluster_info())
            .await
            .inspect_err(|e| error!(error = %e, "Failed to fetch cluster info"))
    }

    /// Create an index with the mapping in `spec`.
    ///
    /// Not idempotent: creating an existing index fails.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index was created
    /// * `Err(DocumentStoreError::ValidationError)` - If the index name is invalid
    /// * `Err(DocumentStoreError::IndexCreationError)` - If the index exists or
    ///   the mapping was rejected
    pub async fn create_index(&self, spec: &IndexSpec) -> Result<(), DocumentStoreError> {
        let log_failure =
            |e: &DocumentStoreError| error!(index = %spec.name, error = %e, "Failed to create index");
        validate_index_name(&spec.name).inspect_err(log_failure)?;

        self.run(self.provider.create_index(spec))
            .await
            .inspect_err(log_failure)?;

        info!(index = %spec.name, "Created index");
        Ok(())
    }

    /// Delete an index and every document in it.
    pub async fn delete_index(&self, index: &str) -> Result<(), DocumentStoreError> {
        let log_failure =
            |e: &DocumentStoreError| error!(index = %index, error = %e, "Failed to delete index");
        validate_index_name(index).inspect_err(log_failure)?;

        self.run(self.provider.delete_index(index))
            .await
            .inspect_err(log_failure)?;

        info!(index = %index, "Deleted index");
        Ok(())
    }

    /// Whether `index` exists.
    pub async fn index_exists(&self, index: &str) -> Result<bool, DocumentStoreError> {
        let log_failure =
            |e: &DocumentStoreError| error!(index = %index, error = %e, "Failed to check index");
        validate_index_name(index).inspect_err(log_failure)?;

        self.run(self.provider.index_exists(index))
            .await
            .inspect_err(log_failure)
    }

    /// Make all prior writes to `index` visible to search.
    pub async fn refresh_index(&self, index: &str) -> Result<(), DocumentStoreError> {
        let log_failure =
            |e: &DocumentStoreError| error!(index = %index, error = %e, "Failed to refresh index");
        validate_index_name(index).inspect_err(log_failure)?;

        self.run(self.provider.refresh_index(index))
            .await
            .inspect_err(log_failure)?;

        debug!(index = %index, "Refreshed index");
        Ok(())
    }

    /// Index one document.
    ///
    /// A document with an id replaces any stored document with the same id; one
    /// without gets an id assigned by the service. The document becomes visible
    /// to search after the next refresh.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The id of the stored document
    /// * `Err(DocumentStoreError::IndexingError)` - If the service rejected it
    pub async fn index_document(
        &self,
        index: &str,
        document: &Document,
    ) -> Result<String, DocumentStoreError> {
        let log_failure = |e: &DocumentStoreError| {
            error!(
                index = %index,
                id = ?document.id,
                error = %e,
                "Failed to index document"
            )
        };
        validate_index_name(index).inspect_err(log_failure)?;
        if let Some(id) = &document.id {
            validate_document_id(id).inspect_err(log_failure)?;
        }

        let id = self
            .run(self.provider.index_document(index, document))
            .await
            .inspect_err(log_failure)?;

        info!(index = %index, id = %id, "Indexed document");
        Ok(id)
    }

    /// Index many documents in a single request.
    ///
    /// Per-document failures are reported in the summary and never raised, so
    /// a partially failed batch is `Ok`. A document with an invalid explicit id
    /// is reported as a failed item and left out of the request.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkIndexSummary)` - Counts and per-item results in batch order
    /// * `Err(DocumentStoreError::BatchSizeExceeded)` - If a batch limit is
    ///   configured and the batch exceeds it
    /// * `Err(DocumentStoreError::ValidationError)` - If the index name is invalid
    /// * `Err(DocumentStoreError)` - If the request failed as a whole
    pub async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkIndexSummary, DocumentStoreError> {
        let log_failure = |e: &DocumentStoreError| {
            error!(
                index = %index,
                count = documents.len(),
                error = %e,
                "Bulk index request failed"
            )
        };
        validate_index_name(index).inspect_err(log_failure)?;

        if documents.is_empty() {
            return Ok(BulkIndexSummary::empty());
        }

        self.validate_batch_size(documents.len())
            .inspect_err(log_failure)?;

        let mut accepted = Vec::with_capacity(documents.len());
        let mut rejected = Vec::new();
        for (position, document) in documents.iter().enumerate() {
            match document.id.as_deref().map(validate_document_id).transpose() {
                Ok(_) => accepted.push(position),
                Err(e) => rejected.push(BulkItemResult::failed(position, document.id.clone(), e)),
            }
        }

        let summary = if rejected.is_empty() {
            self.run(self.provider.bulk_index(index, documents))
                .await
                .inspect_err(log_failure)?
        } else if accepted.is_empty() {
            BulkIndexSummary::from_results(rejected)
        } else {
            let valid: Vec<Document> = accepted.iter().map(|&p| documents[p].clone()).collect();
            let sent = self
                .run(self.provider.bulk_index(index, &valid))
                .await
                .inspect_err(log_failure)?;
            merge_bulk_results(sent, &accepted, rejected)
        };

        for failure in summary.failures() {
            if let Some(e) = &failure.error {
                error!(
                    index = %index,
                    position = failure.position,
                    id = ?failure.id,
                    error = %e,
                    "Document rejected in bulk request"
                );
            }
        }

        info!(
            index = %index,
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk indexed documents"
        );
        Ok(summary)
    }

    /// Fetch a document by id.
    pub async fn get_document(&self, index: &str, id: &str) -> Result<Document, DocumentStoreError> {
        let log_failure = |e: &DocumentStoreError| {
            error!(index = %index, id = %id, error = %e, "Failed to get document")
        };
        validate_index_name(index).inspect_err(log_failure)?;
        validate_document_id(id).inspect_err(log_failure)?;

        self.run(self.provider.get_document(index, id))
            .await
            .inspect_err(log_failure)
    }

    /// Merge `fields` into an existing document, leaving other fields as stored.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was updated
    /// * `Err(DocumentStoreError::ValidationError)` - If `fields` is empty
    /// * `Err(DocumentStoreError::NotFound)` - If the document does not exist
    /// * `Err(DocumentStoreError::UpdateError)` - For any other rejection
    pub async fn update_document(
        &self,
        index: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError> {
        let log_failure = |e: &DocumentStoreError| {
            error!(index = %index, id = %id, error = %e, "Failed to update document")
        };
        validate_index_name(index).inspect_err(log_failure)?;
        validate_document_id(id).inspect_err(log_failure)?;
        if fields.is_empty() {
            let e = DocumentStoreError::validation("at least one field must be provided");
            log_failure(&e);
            return Err(e);
        }

        self.run(self.provider.update_document(index, id, fields))
            .await
            .inspect_err(log_failure)?;

        info!(index = %index, id = %id, fields = fields.len(), "Updated document");
        Ok(())
    }

    /// Delete a document.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted
    /// * `Err(DocumentStoreError::NotFound)` - If the document does not exist
    /// * `Err(DocumentStoreError::DeleteError)` - For any other rejection
    pub async fn delete_document(&self, index: &str, id: &str) -> Result<(), DocumentStoreError> {
        let log_failure = |e: &DocumentStoreError| {
            error!(index = %index, id = %id, error = %e, "Failed to delete document")
        };
        validate_index_name(index).inspect_err(log_failure)?;
        validate_document_id(id).inspect_err(log_failure)?;

        self.run(self.provider.delete_document(index, id))
            .await
            .inspect_err(log_failure)?;

        info!(index = %index, id = %id, "Deleted document");
        Ok(())
    }

    /// Run a search and return the service's result set unmodified.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchResponse)` - The raw result set
    /// * `Err(DocumentStoreError::QueryError)` - If the query is malformed
    /// * `Err(DocumentStoreError::NotFound)` - If the index does not exist
    pub async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResponse, DocumentStoreError> {
        let log_failure = |e: &DocumentStoreError| {
            error!(index = %index, query = %query.body(), error = %e, "Search failed")
        };
        validate_index_name(index).inspect_err(log_failure)?;

        let response = self
            .run(self.provider.search(index, query))
            .await
            .inspect_err(log_failure)?;

        debug!(index = %index, hits = response.total(), "Search completed");
        Ok(response)
    }

    /// Count the documents in `index`, optionally only those matching `query`.
    pub async fn count_documents(
        &self,
        index: &str,
        query: Option<&SearchQuery>,
    ) -> Result<u64, DocumentStoreError> {
        let log_failure = |e: &DocumentStoreError| error!(index = %index, error = %e, "Count failed");
        validate_index_name(index).inspect_err(log_failure)?;

        self.run(self.provider.count_documents(index, query))
            .await
            .inspect_err(log_failure)
    }
}

/// Put the results of a bulk request over the `accepted` subset of a batch back
/// into batch order, alongside the items rejected before sending.
///
/// `accepted[i]` is the batch position of the i-th document sent.
fn merge_bulk_results(
    sent: BulkIndexSummary,
    accepted: &[usize],
    rejected: Vec<BulkItemResult>,
) -> BulkIndexSummary {
    let mut results: Vec<BulkItemResult> = sent
        .results
        .into_iter()
        .map(|mut result| {
            if let Some(&position) = accepted.get(result.position) {
                result.position = position;
            }
            result
        })
        .chain(rejected)
        .collect();
    results.sort_by_key(|r| r.position);
    BulkIndexSummary::from_results(results)
}
