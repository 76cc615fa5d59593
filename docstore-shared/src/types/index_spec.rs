//! Index specification types.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Describes a named collection of documents and the shape of its documents.
///
/// The mapping is passed to the service as-is; field types and analyzers are
/// interpreted by the service, never by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexSpec {
    /// The index name.
    pub name: String,
    /// The mapping, e.g. `{"properties": {"title": {"type": "text"}}}`.
    pub mappings: Value,
    /// Optional index settings (shards, replicas, refresh interval, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

impl IndexSpec {
    /// Create an index specification with a mapping and no explicit settings.
    pub fn new(name: impl Into<String>, mappings: Value) -> Self {
        Self {
            name: name.into(),
            mappings,
            settings: None,
        }
    }

    /// Attach index settings.
    pub fn with_settings(mut self, settings: Value) -> Self {
        self.settings = Some(settings);
        self
    }

    /// The request body used to create the index.
    pub fn create_body(&self) -> Value {
        match &self.settings {
            Some(settings) => json!({
                "settings": settings,
                "mappings": self.mappings,
            }),
            None => json!({ "mappings": self.mappings }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_body_without_settings() {
        let spec = IndexSpec::new(
            "courses",
            json!({ "properties": { "title": { "type": "text" } } }),
        );

        let body = spec.create_body();
        assert_eq!(body["mappings"]["properties"]["title"]["type"], "text");
        assert!(body.get("settings").is_none());
    }

    #[test]
    fn test_create_body_with_settings() {
        let spec = IndexSpec::new("courses", json!({ "properties": {} }))
            .with_settings(json!({ "number_of_shards": 1, "number_of_replicas": 1 }));

        let body = spec.create_body();
        assert_eq!(body["settings"]["number_of_shards"], 1);
        assert!(body["mappings"]["properties"].is_object());
    }
}
