//! Search query types.
//!
//! Queries are opaque request bodies in the service's query DSL. The helpers
//! here only build common bodies; nothing downstream inspects them.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A search request body, passed to the service unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SearchQuery(Value);

impl SearchQuery {
    /// Wrap a complete request body such as `{"query": {...}, "size": 10}`.
    pub fn from_body(body: Value) -> Self {
        Self(body)
    }

    /// Wrap a bare query clause as `{"query": clause}`.
    ///
    /// # Example
    ///
    /// ```
    /// use docstore_shared::SearchQuery;
    /// use serde_json::json;
    ///
    /// let query = SearchQuery::from_clause(json!({ "match_phrase": { "cast": "jack nicholson" } }));
    /// assert_eq!(query.body()["query"]["match_phrase"]["cast"], "jack nicholson");
    /// ```
    pub fn from_clause(clause: Value) -> Self {
        Self(json!({ "query": clause }))
    }

    /// Match every document.
    pub fn match_all() -> Self {
        Self::from_clause(json!({ "match_all": {} }))
    }

    /// Full-text match on a single field.
    pub fn match_field(field: &str, text: impl Into<String>) -> Self {
        let mut clause = serde_json::Map::new();
        clause.insert(field.to_string(), Value::String(text.into()));
        Self::from_clause(json!({ "match": clause }))
    }

    /// Exact lookup by document id.
    pub fn ids(ids: &[&str]) -> Self {
        Self::from_clause(json!({ "ids": { "values": ids } }))
    }

    /// Set the maximum number of hits to return.
    pub fn with_size(mut self, size: usize) -> Self {
        if let Value::Object(ref mut body) = self.0 {
            body.insert("size".to_string(), json!(size));
        }
        self
    }

    /// Set the offset of the first hit to return.
    pub fn with_from(mut self, from: usize) -> Self {
        if let Value::Object(ref mut body) = self.0 {
            body.insert("from".to_string(), json!(from));
        }
        self
    }

    /// The request body.
    pub fn body(&self) -> &Value {
        &self.0
    }

    /// Consume the query and return the request body.
    pub fn into_body(self) -> Value {
        self.0
    }
}

impl From<Value> for SearchQuery {
    fn from(body: Value) -> Self {
        Self::from_body(body)
    }
}
