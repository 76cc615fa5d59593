//! Result types for bulk document store operations.

use crate::errors::DocumentStoreError;

/// Result of a bulk operation for a single item.
///
/// This struct represents the outcome of one document within a bulk request.
/// It indicates whether the operation succeeded and includes error details if
/// it failed.
#[derive(Debug, Clone)]
pub struct BulkItemResult {
    /// Position of the document in the submitted batch.
    pub position: usize,
    /// The document id. For service-assigned ids this is the id the service
    /// reported, when it reported one.
    pub id: Option<String>,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Error if the operation failed.
    pub error: Option<DocumentStoreError>,
}

impl BulkItemResult {
    /// A successful item.
    pub fn succeeded(position: usize, id: Option<String>) -> Self {
        Self {
            position,
            id,
            success: true,
            error: None,
        }
    }

    /// A failed item.
    pub fn failed(position: usize, id: Option<String>, error: DocumentStoreError) -> Self {
        Self {
            position,
            id,
            success: false,
            error: Some(error),
        }
    }
}

/// Summary of a bulk operation containing aggregate statistics and individual results.
///
/// A partially failed batch is a valid outcome: failed items are reported
/// here rather than raised, so callers decide what to do with them.
#[derive(Debug, Clone, Default)]
pub struct BulkIndexSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item, in batch order.
    pub results: Vec<BulkItemResult>,
}

impl BulkIndexSummary {
    /// Build a summary from per-item results, computing the counters.
    pub fn from_results(results: Vec<BulkItemResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// The summary of an empty batch.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The items that failed.
    pub fn failures(&self) -> Vec<&BulkItemResult> {
        self.results.iter().filter(|r| !r.success).collect()
    }

    /// Whether every item succeeded.
    pub fn is_complete_success(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_results_counts() {
        let summary = BulkIndexSummary::from_results(vec![
            BulkItemResult::succeeded(0, Some("a".to_string())),
            BulkItemResult::failed(
                1,
                Some("b".to_string()),
                DocumentStoreError::indexing("mapper_parsing_exception"),
            ),
            BulkItemResult::succeeded(2, Some("c".to_string())),
        ]);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_complete_success());

        let failures = summary.failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].position, 1);
        assert_eq!(failures[0].id.as_deref(), Some("b"));
    }

    #[test]
    fn test_empty() {
        let summary = BulkIndexSummary::empty();
        assert_eq!(summary.total, 0);
        assert!(summary.results.is_empty());
        assert!(summary.is_complete_success());
    }
}
