//! In-memory stand-in for the document search service.
//!
//! Behaves like a single-node cluster for the subset of the REST dialect the
//! client uses: writes become searchable only after a refresh, `integer` and
//! `long` mapped fields reject non-integer values, and searches understand
//! `match_all`, `match` and `ids` queries.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use docstore_repository::{
    BulkIndexSummary, BulkItemResult, DocumentStoreError, DocumentStoreProvider,
};
use docstore_shared::{Document, Fields, IndexSpec, SearchQuery, SearchResponse};

#[derive(Default)]
struct FakeIndex {
    mappings: Value,
    documents: BTreeMap<String, Fields>,
    searchable: BTreeMap<String, Fields>,
}

impl FakeIndex {
    fn check_types(&self, fields: &Fields) -> Result<(), String> {
        for (name, value) in fields {
            let field_type = self.mappings["properties"][name]["type"].as_str();
            if matches!(field_type, Some("integer") | Some("long")) && !value.is_i64() {
                return Err(format!(
                    "status 400: mapper_parsing_exception: failed to parse field [{}] of type [{}]",
                    name,
                    field_type.unwrap_or_default()
                ));
            }
        }
        Ok(())
    }
}

#[derive(Default)]
struct FakeState {
    indexes: HashMap<String, FakeIndex>,
    next_id: u64,
    requests: usize,
}

/// Cloneable handle to one fake cluster; clones share state.
#[derive(Clone, Default)]
pub struct FakeDocumentStore {
    state: Arc<Mutex<FakeState>>,
}

impl FakeDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls that reached the fake.
    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        state.requests += 1;
        f(&mut *state)
    }
}

fn store(index: &mut FakeIndex, next_id: &mut u64, document: &Document) -> Result<String, String> {
    index.check_types(&document.fields)?;
    let id = match &document.id {
        Some(id) => id.clone(),
        None => {
            *next_id += 1;
            format!("fake-{}", next_id)
        }
    };
    index.documents.insert(id.clone(), document.fields.clone());
    Ok(id)
}

fn tokens(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn matcher(body: &Value) -> Result<Box<dyn Fn(&str, &Fields) -> bool>, DocumentStoreError> {
    let query = match body.get("query") {
        None => return Ok(Box::new(|_: &str, _: &Fields| true)),
        Some(Value::Object(query)) => query,
        Some(other) => {
            return Err(DocumentStoreError::query(format!(
                "status 400: parsing_exception: query must be an object, got {}",
                other
            )))
        }
    };

    let (kind, clause) = query.iter().next().ok_or_else(|| {
        DocumentStoreError::query("status 400: parsing_exception: query is empty")
    })?;

    match kind.as_str() {
        "match_all" => Ok(Box::new(|_: &str, _: &Fields| true)),
        "match" => {
            let (field, text) = clause
                .as_object()
                .and_then(|c| c.iter().next())
                .ok_or_else(|| {
                    DocumentStoreError::query("status 400: parsing_exception: match needs a field")
                })?;
            let text = text
                .as_str()
                .or_else(|| text["query"].as_str())
                .unwrap_or_default();
            let wanted = tokens(text);
            let field = field.clone();
            Ok(Box::new(move |_: &str, fields: &Fields| {
                let have = tokens(fields.get(&field).and_then(Value::as_str).unwrap_or_default());
                wanted.iter().any(|t| have.contains(t))
            }))
        }
        "ids" => {
            let ids: Vec<String> = clause["values"]
                .as_array()
                .map(|values| {
                    values
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Ok(Box::new(move |id: &str, _: &Fields| ids.iter().any(|i| i == id)))
        }
        other => Err(DocumentStoreError::query(format!(
            "status 400: parsing_exception: unknown query [{}]",
            other
        ))),
    }
}

#[async_trait]
impl DocumentStoreProvider for FakeDocumentStore {
    async fn ping(&self) -> Result<bool, DocumentStoreError> {
        self.with_state(|_| Ok(true))
    }

    async fn cluster_info(&self) -> Result<Value, DocumentStoreError> {
        self.with_state(|_| {
            Ok(json!({
                "name": "fake-node",
                "cluster_name": "fake",
                "version": { "distribution": "opensearch", "number": "2.11.0" },
                "tagline": "The OpenSearch Project: https://opensearch.org/"
            }))
        })
    }

    async fn create_index(&self, spec: &IndexSpec) -> Result<(), DocumentStoreError> {
        self.with_state(|state| {
            if state.indexes.contains_key(&spec.name) {
                return Err(DocumentStoreError::index_creation(format!(
                    "status 400: resource_already_exists_exception: index [{}] already exists",
                    spec.name
                )));
            }
            state.indexes.insert(
                spec.name.clone(),
                FakeIndex {
                    mappings: spec.mappings.clone(),
                    ..FakeIndex::default()
                },
            );
            Ok(())
        })
    }

    async fn delete_index(&self, index: &str) -> Result<(), DocumentStoreError> {
        self.with_state(|state| {
            state
                .indexes
                .remove(index)
                .map(|_| ())
                .ok_or_else(|| DocumentStoreError::index_not_found(index))
        })
    }

    async fn index_exists(&self, index: &str) -> Result<bool, DocumentStoreError> {
        self.with_state(|state| Ok(state.indexes.contains_key(index)))
    }

    async fn refresh_index(&self, index: &str) -> Result<(), DocumentStoreError> {
        self.with_state(|state| {
            let fake = state
                .indexes
                .get_mut(index)
                .ok_or_else(|| DocumentStoreError::index_not_found(index))?;
            fake.searchable = fake.documents.clone();
            Ok(())
        })
    }

    async fn index_document(
        &self,
        index: &str,
        document: &Document,
    ) -> Result<String, DocumentStoreError> {
        self.with_state(|state| {
            let FakeState {
                indexes, next_id, ..
            } = state;
            // Writing to an unknown index creates it with a dynamic mapping.
            let fake = indexes.entry(index.to_string()).or_default();
            store(fake, next_id, document).map_err(DocumentStoreError::indexing)
        })
    }

    async fn bulk_index(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<BulkIndexSummary, DocumentStoreError> {
        self.with_state(|state| {
            let FakeState {
                indexes, next_id, ..
            } = state;
            let fake = indexes.entry(index.to_string()).or_default();
            let results = documents
                .iter()
                .enumerate()
                .map(|(position, document)| match store(fake, next_id, document) {
                    Ok(id) => BulkItemResult::succeeded(position, Some(id)),
                    Err(reason) => BulkItemResult::failed(
                        position,
                        document.id.clone(),
                        DocumentStoreError::indexing(reason),
                    ),
                })
                .collect();
            Ok(BulkIndexSummary::from_results(results))
        })
    }

    async fn get_document(&self, index: &str, id: &str) -> Result<Document, DocumentStoreError> {
        self.with_state(|state| {
            state
                .indexes
                .get(index)
                .and_then(|fake| fake.documents.get(id))
                .map(|fields| Document::with_id(id, fields.clone()))
                .ok_or_else(|| DocumentStoreError::document_not_found(index, id))
        })
    }

    async fn update_document(
        &self,
        index: &str,
        id: &str,
        fields: &Fields,
    ) -> Result<(), DocumentStoreError> {
        self.with_state(|state| {
            let fake = state
                .indexes
                .get_mut(index)
                .ok_or_else(|| DocumentStoreError::document_not_found(index, id))?;
            fake.check_types(fields).map_err(DocumentStoreError::update)?;
            let stored = fake
                .documents
                .get_mut(id)
                .ok_or_else(|| DocumentStoreError::document_not_found(index, id))?;
            for (name, value) in fields {
                stored.insert(name.clone(), value.clone());
            }
            Ok(())
        })
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<(), DocumentStoreError> {
        self.with_state(|state| {
            state
                .indexes
                .get_mut(index)
                .and_then(|fake| fake.documents.remove(id))
                .map(|_| ())
                .ok_or_else(|| DocumentStoreError::document_not_found(index, id))
        })
    }

    async fn search(
        &self,
        index: &str,
        query: &SearchQuery,
    ) -> Result<SearchResponse, DocumentStoreError> {
        self.with_state(|state| {
            let fake = state
                .indexes
                .get(index)
                .ok_or_else(|| DocumentStoreError::index_not_found(index))?;
            let matches = matcher(query.body())?;
            let from = query.body()["from"].as_u64().unwrap_or(0) as usize;
            let size = query.body()["size"].as_u64().unwrap_or(10) as usize;

            let matching: Vec<(&String, &Fields)> = fake
                .searchable
                .iter()
                .filter(|(id, fields)| matches(id.as_str(), fields))
                .collect();

            let hits: Vec<Value> = matching
                .iter()
                .skip(from)
                .take(size)
                .map(|(id, fields)| {
                    json!({
                        "_index": index,
                        "_id": id,
                        "_score": 1.0,
                        "_source": Value::Object((*fields).clone()),
                    })
                })
                .collect();

            let max_score = if matching.is_empty() {
                Value::Null
            } else {
                json!(1.0)
            };

            Ok(SearchResponse::new(json!({
                "took": 1,
                "timed_out": false,
                "_shards": { "total": 1, "successful": 1, "skipped": 0, "failed": 0 },
                "hits": {
                    "total": { "value": matching.len(), "relation": "eq" },
                    "max_score": max_score,
                    "hits": hits,
                }
            })))
        })
    }

    async fn count_documents(
        &self,
        index: &str,
        query: Option<&SearchQuery>,
    ) -> Result<u64, DocumentStoreError> {
        self.with_state(|state| {
            let fake = state
                .indexes
                .get(index)
                .ok_or_else(|| DocumentStoreError::index_not_found(index))?;
            let matches: Box<dyn Fn(&str, &Fields) -> bool> = match query {
                Some(query) => matcher(query.body())?,
                None => Box::new(|_: &str, _: &Fields| true),
            };
            Ok(fake
                .searchable
                .iter()
                .filter(|(id, fields)| matches(id.as_str(), fields))
                .count() as u64)
        })
    }
}
