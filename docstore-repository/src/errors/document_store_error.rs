//! Document store error types.
//!
//! This module defines the unified error type for all document store operations,
//! covering transport failures, service rejections and client-side validation.

use thiserror::Error;

/// Unified errors from document store operations.
///
/// Used by the `DocumentStoreProvider` trait and `DocumentStoreClient`. Each
/// variant names the kind of failure so callers can branch on it; the payload
/// carries the service's diagnostic message where one exists.
#[derive(Debug, Clone, Error)]
pub enum DocumentStoreError {
    /// The service could not be reached, or the liveness probe failed.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service refused to create an index (already exists, bad mapping).
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// The service refused to index a document.
    #[error("Indexing error: {0}")]
    IndexingError(String),

    /// The service refused a partial update.
    #[error("Update error: {0}")]
    UpdateError(String),

    /// The service refused a delete for a reason other than absence.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// The query was malformed or rejected by the service.
    #[error("Query error: {0}")]
    QueryError(String),

    /// The target document or index does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation did not finish before its deadline.
    #[error("Operation timed out after {0} ms")]
    Timeout(u64),

    /// Input rejected before contacting the service.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to parse a response from the service.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },
}

impl DocumentStoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an indexing error.
    pub fn indexing(msg: impl Into<String>) -> Self {
        Self::IndexingError(msg.into())
    }

    /// Create an update error.
    pub fn update(msg: impl Into<String>) -> Self {
        Self::UpdateError(msg.into())
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a not found error for a generic target.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a not found error for a document.
    pub fn document_not_found(index: &str, id: &str) -> Self {
        Self::NotFound(format!("index={}, id={}", index, id))
    }

    /// Create a not found error for an index.
    pub fn index_not_found(index: &str) -> Self {
        Self::NotFound(format!("index={}", index))
    }

    /// Create a timeout error.
    pub fn timeout(elapsed_ms: u64) -> Self {
        Self::Timeout(elapsed_ms)
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Whether the error reports a missing document or index.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the error reports an expired deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}
