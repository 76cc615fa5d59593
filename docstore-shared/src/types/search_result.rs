//! Search result types.
//!
//! The service's result set is kept exactly as returned. Accessors read the
//! commonly used parts (hits, totals, timing) without reshaping the body.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::document::{Document, Fields};

/// A single hit read from a search result set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// The index the hit came from.
    pub index: String,
    /// The document id.
    pub id: String,
    /// Relevance score. `None` when the query was not scored.
    pub score: Option<f64>,
    /// The stored document body.
    pub source: Fields,
}

impl SearchHit {
    /// Convert the hit into a document carrying its id.
    pub fn into_document(self) -> Document {
        Document::with_id(self.id, self.source)
    }
}

/// The raw result set of a search request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SearchResponse {
    body: Value,
}

impl SearchResponse {
    /// Wrap a response body returned by the service.
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Create an empty search response.
    pub fn empty() -> Self {
        Self {
            body: serde_json::json!({
                "took": 0,
                "timed_out": false,
                "hits": { "total": { "value": 0, "relation": "eq" }, "max_score": null, "hits": [] }
            }),
        }
    }

    /// The unmodified response body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    /// Consume the response and return the unmodified body.
    pub fn into_body(self) -> Value {
        self.body
    }

    /// Time the service spent executing the search, in milliseconds.
    pub fn took_ms(&self) -> u64 {
        self.body["took"].as_u64().unwrap_or(0)
    }

    /// Whether the service reported a partial result due to its own timeout.
    pub fn timed_out(&self) -> bool {
        self.body["timed_out"].as_bool().unwrap_or(false)
    }

    /// Total number of matching documents.
    ///
    /// Accepts both the object form (`{"value": n}`) and the legacy bare number.
    /// May be greater than the number of returned hits due to pagination.
    pub fn total(&self) -> u64 {
        let total = &self.body["hits"]["total"];
        total["value"].as_u64().or_else(|| total.as_u64()).unwrap_or(0)
    }

    /// Highest relevance score among the hits, if any.
    pub fn max_score(&self) -> Option<f64> {
        self.body["hits"]["max_score"].as_f64()
    }

    /// The hits in service order. Entries without an id are skipped.
    pub fn hits(&self) -> Vec<SearchHit> {
        self.body["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter().filter_map(Self::parse_hit).collect())
            .unwrap_or_default()
    }

    /// Returns the number of hits in this response.
    pub fn len(&self) -> usize {
        self.body["hits"]["hits"]
            .as_array()
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Returns true if there are no hits.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parse_hit(hit: &Value) -> Option<SearchHit> {
        let id = hit["_id"].as_str()?.to_string();
        Some(SearchHit {
            index: hit["_index"].as_str().unwrap_or_default().to_string(),
            id,
            score: hit["_score"].as_f64(),
            source: hit["_source"].as_object().cloned().unwrap_or_default(),
        })
    }
}
