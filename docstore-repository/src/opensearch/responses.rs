//! Request body builders and response parsers for the REST dialect.
//!
//! Everything here is pure so the wire handling can be tested without a
//! running service.

use std::fmt;

use serde_json::{json, Value};

use crate::errors::DocumentStoreError;
use crate::types::{BulkIndexSummary, BulkItemResult};
use docstore_shared::Document;

/// A non-success response from the service, reduced to its diagnostic parts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ServiceFailure {
    pub status: u16,
    pub error_type: Option<String>,
    pub reason: String,
}

impl ServiceFailure {
    /// Parse a failure from a status code and raw response text.
    ///
    /// Text that is not JSON is kept verbatim as the reason.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(status, &value),
            Err(_) => {
                let reason = if body.trim().is_empty() {
                    "empty response body".to_string()
                } else {
                    body.trim().to_string()
                };
                Self {
                    status,
                    error_type: None,
                    reason,
                }
            }
        }
    }

    /// Parse a failure from a JSON response body.
    ///
    /// Understands the structured `{"error": {"type", "reason"}}` shape, the
    /// plain `{"error": "..."}` shape, and document responses such as
    /// `{"result": "not_found"}`.
    pub fn from_value(status: u16, body: &Value) -> Self {
        let (error_type, reason) = match &body["error"] {
            Value::Object(error) => (
                error.get("type").and_then(Value::as_str).map(str::to_string),
                error
                    .get("reason")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            ),
            Value::String(reason) => (None, reason.clone()),
            _ => match body["result"].as_str() {
                Some(result) => (None, result.to_string()),
                None => (None, body.to_string()),
            },
        };

        Self {
            status,
            error_type,
            reason,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_type(&self, error_type: &str) -> bool {
        self.error_type.as_deref() == Some(error_type)
    }
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_type {
            Some(error_type) => write!(f, "status {}: {}: {}", self.status, error_type, self.reason),
            None => write!(f, "status {}: {}", self.status, self.reason),
        }
    }
}

/// Build the newline-delimited lines of a bulk request of `index` actions.
///
/// The target index is carried by the request path, so action lines only
/// name the id, and only when the document has one.
pub(crate) fn bulk_index_lines(documents: &[Document]) -> Vec<Value> {
    let mut lines = Vec::with_capacity(documents.len() * 2);
    for document in documents {
        let action = match &document.id {
            Some(id) => json!({ "index": { "_id": id } }),
            None => json!({ "index": {} }),
        };
        lines.push(action);
        lines.push(document.to_value());
    }
    lines
}

/// Turn a bulk response into a per-item summary.
///
/// The service answers with one item per action, in request order.
pub(crate) fn parse_bulk_response(
    body: &Value,
    documents: &[Document],
) -> Result<BulkIndexSummary, DocumentStoreError> {
    let items = body["items"]
        .as_array()
        .ok_or_else(|| DocumentStoreError::parse("bulk response has no items"))?;

    if items.len() != documents.len() {
        return Err(DocumentStoreError::parse(format!(
            "bulk response has {} items for {} documents",
            items.len(),
            documents.len()
        )));
    }

    let results = items
        .iter()
        .zip(documents)
        .enumerate()
        .map(|(position, (item, document))| {
            // Each item is keyed by its action name, e.g. {"index": {...}}.
            let entry = item
                .as_object()
                .and_then(|obj| obj.values().next())
                .unwrap_or(&Value::Null);

            let id = entry["_id"]
                .as_str()
                .map(str::to_string)
                .or_else(|| document.id.clone());
            let status = entry["status"].as_u64().unwrap_or(0) as u16;

            if entry.get("error").is_some() || !(200..300).contains(&status) {
                let failure = ServiceFailure::from_value(status, entry);
                BulkItemResult::failed(
                    position,
                    id,
                    DocumentStoreError::indexing(failure.to_string()),
                )
            } else {
                BulkItemResult::succeeded(position, id)
            }
        })
        .collect();

    Ok(BulkIndexSummary::from_results(results))
}

/// Read the `_id` the service assigned in an index response.
pub(crate) fn assigned_id(body: &Value) -> Result<String, DocumentStoreError> {
    body["_id"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DocumentStoreError::parse("index response has no _id"))
}

/// Turn a get-document response into a `Document`.
pub(crate) fn parse_get_response(
    index: &str,
    id: &str,
    body: &Value,
) -> Result<Document, DocumentStoreError> {
    if !body["found"].as_bool().unwrap_or(false) {
        return Err(DocumentStoreError::document_not_found(index, id));
    }

    let source = body["_source"]
        .as_object()
        .cloned()
        .ok_or_else(|| DocumentStoreError::parse("get response has no _source"))?;

    Ok(Document::with_id(id, source))
}

/// The count-API body for an optional search body.
///
/// The count API only accepts a `query` clause, so pagination or sorting keys
/// present in a search body are left out.
pub(crate) fn count_body(search_body: &Value) -> Value {
    match search_body.get("query") {
        Some(query) => json!({ "query": query }),
        None => json!({}),
    }
}
