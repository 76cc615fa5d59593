//! Document types for the document store.
//!
//! A document is a free-form JSON object stored under an id in a named index.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field name to value mapping that makes up a document body.
pub type Fields = Map<String, Value>;

/// A document as it is sent to, or read back from, the document store.
///
/// The identity of a stored document is the pair (index name, id). When `id`
/// is `None` the service assigns one at indexing time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Document {
    /// Optional document id. `None` lets the service generate one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The document body.
    pub fields: Fields,
}

impl Document {
    /// Create a document without an id; the service will assign one.
    pub fn new(fields: Fields) -> Self {
        Self { id: None, fields }
    }

    /// Create a document with an explicit id.
    ///
    /// # Example
    ///
    /// ```
    /// use docstore_shared::Document;
    /// use serde_json::json;
    ///
    /// let doc = Document::with_id(
    ///     "course-1",
    ///     json!({ "title": "Python Programming" }).as_object().cloned().unwrap(),
    /// );
    /// assert_eq!(doc.id.as_deref(), Some("course-1"));
    /// ```
    pub fn with_id(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: Some(id.into()),
            fields,
        }
    }

    /// Build a document from a JSON value.
    ///
    /// Returns `None` if the value is not a JSON object, since only objects
    /// can be stored as document bodies.
    pub fn from_value(id: Option<String>, value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { id, fields }),
            _ => None,
        }
    }

    /// Look up a single field.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The document body as a JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}
