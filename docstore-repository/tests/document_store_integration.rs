//! Integration tests for the document store client.
//!
//! These tests use the real DocumentStoreClient against an in-memory fake
//! service so every property can be checked without a running cluster.

mod common;

use std::time::Duration;

use serde_json::{json, Value};

use common::FakeDocumentStore;
use docstore_repository::{DocumentStoreClient, DocumentStoreError};
use docstore_shared::{Document, Fields, IndexSpec, SearchQuery};

fn client_with_fake() -> (DocumentStoreClient, FakeDocumentStore) {
    let fake = FakeDocumentStore::new();
    let client = DocumentStoreClient::new(Box::new(fake.clone()));
    (client, fake)
}

fn courses_spec() -> IndexSpec {
    IndexSpec::new(
        "courses",
        json!({
            "properties": {
                "title": { "type": "text" },
                "description": { "type": "text" }
            }
        }),
    )
}

fn movies_spec() -> IndexSpec {
    IndexSpec::new(
        "movies",
        json!({
            "properties": {
                "title": { "type": "text" },
                "director": { "type": "keyword" },
                "year": { "type": "integer" }
            }
        }),
    )
}

fn doc(id: Option<&str>, value: Value) -> Document {
    Document::from_value(id.map(str::to_string), value).unwrap()
}

fn fields(value: Value) -> Fields {
    value.as_object().cloned().unwrap()
}

#[tokio::test]
async fn test_create_index_then_verify_connection() {
    let (client, _) = client_with_fake();

    client.create_index(&courses_spec()).await.unwrap();
    client.verify_connection().await.unwrap();
    assert!(client.index_exists("courses").await.unwrap());
}

#[tokio::test]
async fn test_create_index_twice_fails() {
    let (client, _) = client_with_fake();

    client.create_index(&courses_spec()).await.unwrap();
    let err = client.create_index(&courses_spec()).await.unwrap_err();

    match err {
        DocumentStoreError::IndexCreationError(msg) => {
            assert!(msg.contains("resource_already_exists_exception"));
            assert!(msg.contains("courses"));
        }
        other => panic!("Expected IndexCreationError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_indexed_document_found_by_id_after_refresh() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();

    let source = json!({
        "title": "Rust Programming",
        "description": "Ownership, borrowing and lifetimes"
    });
    let id = client
        .index_document("courses", &doc(Some("rust-101"), source.clone()))
        .await
        .unwrap();
    assert_eq!(id, "rust-101");

    client.refresh_index("courses").await.unwrap();
    let response = client
        .search("courses", &SearchQuery::ids(&["rust-101"]))
        .await
        .unwrap();

    assert_eq!(response.total(), 1);
    let hits = response.hits();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "rust-101");
    assert_eq!(Value::Object(hits[0].source.clone()), source);
}

#[tokio::test]
async fn test_writes_invisible_until_refresh() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();

    client
        .index_document("courses", &doc(Some("1"), json!({ "title": "Go Programming" })))
        .await
        .unwrap();

    let before = client.search("courses", &SearchQuery::match_all()).await.unwrap();
    assert!(before.is_empty());

    // Fetch by id is realtime.
    assert!(client.get_document("courses", "1").await.is_ok());

    client.refresh_index("courses").await.unwrap();
    let after = client.search("courses", &SearchQuery::match_all()).await.unwrap();
    assert_eq!(after.total(), 1);
}

#[tokio::test]
async fn test_service_assigned_id() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();

    let id = client
        .index_document("courses", &doc(None, json!({ "title": "C Programming" })))
        .await
        .unwrap();

    assert!(!id.is_empty());
    let stored = client.get_document("courses", &id).await.unwrap();
    assert_eq!(stored.id.as_deref(), Some(id.as_str()));
    assert_eq!(stored.fields["title"], "C Programming");
}

#[tokio::test]
async fn test_update_merges_fields() {
    let (client, _) = client_with_fake();
    client.create_index(&movies_spec()).await.unwrap();
    client
        .index_document(
            "movies",
            &doc(
                Some("tt0133093"),
                json!({ "title": "The Matrix", "director": "Wachowski", "year": 1998 }),
            ),
        )
        .await
        .unwrap();

    client
        .update_document("movies", "tt0133093", &fields(json!({ "year": 1999 })))
        .await
        .unwrap();

    let stored = client.get_document("movies", "tt0133093").await.unwrap();
    assert_eq!(stored.fields["year"], 1999);
    assert_eq!(stored.fields["title"], "The Matrix");
    assert_eq!(stored.fields["director"], "Wachowski");
}

#[tokio::test]
async fn test_update_rejected_by_mapping() {
    let (client, _) = client_with_fake();
    client.create_index(&movies_spec()).await.unwrap();
    client
        .index_document("movies", &doc(Some("1"), json!({ "title": "Alien", "year": 1979 })))
        .await
        .unwrap();

    let result = client
        .update_document("movies", "1", &fields(json!({ "year": "nineteen" })))
        .await;
    assert!(matches!(result, Err(DocumentStoreError::UpdateError(_))));
}

#[tokio::test]
async fn test_deleted_document_is_not_found() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();
    client
        .index_document("courses", &doc(Some("1"), json!({ "title": "Python Programming" })))
        .await
        .unwrap();

    client.delete_document("courses", "1").await.unwrap();

    assert!(client
        .get_document("courses", "1")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(client
        .update_document("courses", "1", &fields(json!({ "title": "Python 3" })))
        .await
        .unwrap_err()
        .is_not_found());
    assert!(client
        .delete_document("courses", "1")
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn test_bulk_index_reports_malformed_documents() {
    let (client, _) = client_with_fake();
    client.create_index(&movies_spec()).await.unwrap();

    let documents = vec![
        doc(Some("1"), json!({ "title": "Heat", "year": 1995 })),
        doc(Some("2"), json!({ "title": "Ronin", "year": "late nineties" })),
        doc(None, json!({ "title": "Collateral", "year": 2004 })),
        doc(Some("4"), json!({ "title": "Thief", "year": 1981.5 })),
        doc(Some("5"), json!({ "title": "Manhunter", "year": 1986 })),
    ];

    let summary = client.bulk_index("movies", &documents).await.unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.failed, 2);

    let failed_positions: Vec<usize> = summary.failures().iter().map(|f| f.position).collect();
    assert_eq!(failed_positions, vec![1, 3]);
    for failure in summary.failures() {
        assert!(matches!(
            failure.error,
            Some(DocumentStoreError::IndexingError(_))
        ));
    }

    client.refresh_index("movies").await.unwrap();
    assert_eq!(client.count_documents("movies", None).await.unwrap(), 3);
}

#[tokio::test]
async fn test_courses_scenario() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();

    let documents = vec![
        doc(None, json!({ "title": "Python Programming", "description": "Learn Python from scratch" })),
        doc(None, json!({ "title": "JavaScript Programming", "description": "The language of the web" })),
        doc(None, json!({ "title": "Java Programming", "description": "Object oriented programming" })),
    ];
    let summary = client.bulk_index("courses", &documents).await.unwrap();
    assert!(summary.is_complete_success());

    client.refresh_index("courses").await.unwrap();
    let response = client
        .search("courses", &SearchQuery::match_field("title", "Python"))
        .await
        .unwrap();

    assert_eq!(response.total(), 1);
    assert_eq!(response.hits()[0].source["title"], "Python Programming");

    let programming = SearchQuery::match_field("title", "programming");
    assert_eq!(
        client
            .count_documents("courses", Some(&programming))
            .await
            .unwrap(),
        3
    );
}

#[tokio::test]
async fn test_search_malformed_query() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();

    let query = SearchQuery::from_body(json!({ "query": { "no_such_query": {} } }));
    match client.search("courses", &query).await {
        Err(DocumentStoreError::QueryError(msg)) => assert!(msg.contains("no_such_query")),
        other => panic!("Expected QueryError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_search_missing_index() {
    let (client, _) = client_with_fake();

    let err = client
        .search("nowhere", &SearchQuery::match_all())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_delete_index_lifecycle() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();

    client.delete_index("courses").await.unwrap();
    assert!(!client.index_exists("courses").await.unwrap());
    assert!(client.delete_index("courses").await.unwrap_err().is_not_found());

    // The name is free again.
    client.create_index(&courses_spec()).await.unwrap();
}

#[tokio::test]
async fn test_validation_never_reaches_service() {
    let (client, fake) = client_with_fake();

    let bad_names = ["", "Courses", "_courses", "my index", "a,b"];
    for name in bad_names {
        let result = client.search(name, &SearchQuery::match_all()).await;
        assert!(
            matches!(result, Err(DocumentStoreError::ValidationError(_))),
            "Expected ValidationError for '{}'",
            name
        );
    }
    assert!(matches!(
        client.get_document("courses", "").await,
        Err(DocumentStoreError::ValidationError(_))
    ));
    assert!(matches!(
        client
            .bulk_index("Courses", &[doc(Some("1"), json!({ "title": "x" }))])
            .await,
        Err(DocumentStoreError::ValidationError(_))
    ));

    assert_eq!(fake.request_count(), 0);
}

#[tokio::test]
async fn test_bulk_index_reports_invalid_ids_without_aborting() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();

    let documents = vec![
        doc(Some("1"), json!({ "title": "Python Programming" })),
        doc(Some(""), json!({ "title": "JavaScript Programming" })),
        doc(Some("3"), json!({ "title": "Java Programming" })),
    ];

    let summary = client.bulk_index("courses", &documents).await.unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    let failures = summary.failures();
    assert_eq!(failures[0].position, 1);
    assert!(matches!(
        failures[0].error,
        Some(DocumentStoreError::ValidationError(_))
    ));
    assert_eq!(summary.results[2].id.as_deref(), Some("3"));

    client.refresh_index("courses").await.unwrap();
    assert_eq!(client.count_documents("courses", None).await.unwrap(), 2);
}

#[tokio::test]
async fn test_large_bulk_batch_under_default_config() {
    let (client, fake) = client_with_fake();
    client.create_index(&movies_spec()).await.unwrap();

    let documents: Vec<Document> = (0..5000)
        .map(|i| {
            doc(
                Some(&i.to_string()),
                json!({ "title": format!("Movie {}", i), "year": 1900 + (i % 120) }),
            )
        })
        .collect();

    let before = fake.request_count();
    let summary = client.bulk_index("movies", &documents).await.unwrap();

    assert_eq!(summary.total, 5000);
    assert_eq!(summary.succeeded, 5000);
    assert_eq!(fake.request_count(), before + 1);
}

#[tokio::test]
async fn test_cluster_info_passthrough() {
    let (client, _) = client_with_fake();

    let info = client.cluster_info().await.unwrap();
    assert_eq!(info["version"]["number"], "2.11.0");
}

#[tokio::test]
async fn test_concurrent_writers_share_client() {
    let (client, _) = client_with_fake();
    client.create_index(&courses_spec()).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..10 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let id = format!("course-{}", i);
            let document = doc(Some(&id), json!({ "title": format!("Course {}", i) }));
            client.index_document("courses", &document).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    client.refresh_index("courses").await.unwrap();
    assert_eq!(client.count_documents("courses", None).await.unwrap(), 10);
}

#[tokio::test]
async fn test_per_call_deadline_leaves_original_client_untouched() {
    let (client, _) = client_with_fake();

    let quick = client.with_timeout(Duration::from_millis(500));
    quick.verify_connection().await.unwrap();

    assert_eq!(quick.operation_timeout(), Some(Duration::from_millis(500)));
    assert_eq!(client.operation_timeout(), Some(Duration::from_secs(30)));
}
