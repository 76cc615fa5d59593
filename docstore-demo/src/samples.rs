//! Sample mappings, documents and queries used by the scenarios.

use serde_json::{json, Value};
use uuid::Uuid;

use docstore_shared::{Document, Fields, IndexSpec, SearchQuery};

pub const COURSES_INDEX: &str = "courses";
pub const MOVIES_INDEX: &str = "movies";
pub const DAM_INDEX: &str = "dam1";

fn object(value: Value) -> Fields {
    match value {
        Value::Object(fields) => fields,
        _ => Fields::new(),
    }
}

fn document(id: Option<String>, value: Value) -> Document {
    match id {
        Some(id) => Document::with_id(id, object(value)),
        None => Document::new(object(value)),
    }
}

fn random_id() -> Option<String> {
    Some(Uuid::new_v4().to_string())
}

/// Courses index with english-analyzed text fields.
pub fn courses_index() -> IndexSpec {
    IndexSpec::new(
        COURSES_INDEX,
        json!({
            "properties": {
                "title": { "type": "text", "analyzer": "english" },
                "description": { "type": "text", "analyzer": "english" }
            }
        }),
    )
}

/// Three programming courses, each with a fresh id.
pub fn course_documents() -> Vec<Document> {
    [
        ("Python Programming", "Learn Python programming from scratch."),
        ("JavaScript Programming", "Learn JavaScript programming from scratch."),
        ("Java Programming", "Learn Java programming from scratch."),
    ]
    .into_iter()
    .map(|(title, description)| {
        document(
            random_id(),
            json!({ "title": title, "description": description }),
        )
    })
    .collect()
}

/// A course indexed on its own, then updated and deleted.
pub fn single_course() -> Document {
    document(
        random_id(),
        json!({
            "title": "Rust Programming",
            "description": "Learn Rust programming from scratch."
        }),
    )
}

/// Partial update applied to `single_course`.
pub fn course_update() -> Fields {
    object(json!({
        "title": "Rust Programming 2",
        "description": "Learn Rust programming from scratch. Also, learn Axum to build web apps."
    }))
}

/// Movies index for wiki movie plots.
pub fn movies_index() -> IndexSpec {
    IndexSpec::new(
        MOVIES_INDEX,
        json!({
            "properties": {
                "title": { "type": "text", "analyzer": "english" },
                "ethnicity": { "type": "text", "analyzer": "standard" },
                "director": { "type": "text", "analyzer": "standard" },
                "cast": { "type": "text", "analyzer": "standard" },
                "genre": { "type": "text", "analyzer": "standard" },
                "plot": { "type": "text", "analyzer": "english" },
                "year": { "type": "integer" },
                "wiki_page": { "type": "keyword" }
            }
        }),
    )
}

/// A handful of movies keyed by their position, like rows of a plot table.
///
/// The last one carries a non-integer year and is rejected by the mapping.
pub fn movie_documents() -> Vec<Document> {
    let rows = [
        json!({
            "title": "Chinatown",
            "ethnicity": "American",
            "director": "Roman Polanski",
            "cast": "Jack Nicholson, Faye Dunaway, John Huston",
            "genre": "mystery",
            "plot": "A private detective hired to expose an adulterer finds himself caught up in a web of deceit.",
            "year": 1974,
            "wiki_page": "https://en.wikipedia.org/wiki/Chinatown_(1974_film)"
        }),
        json!({
            "title": "The Shining",
            "ethnicity": "American",
            "director": "Stanley Kubrick",
            "cast": "Jack Nicholson, Shelley Duvall",
            "genre": "horror",
            "plot": "A family heads to an isolated hotel for the winter where an evil presence influences the father.",
            "year": 1980,
            "wiki_page": "https://en.wikipedia.org/wiki/The_Shining_(film)"
        }),
        json!({
            "title": "Five Easy Pieces",
            "ethnicity": "American",
            "director": "Bob Rafelson",
            "cast": "Jack Nicholson, Karen Black",
            "genre": "drama",
            "plot": "A drifter working on an oil rig returns home to visit his ailing father.",
            "year": 1970,
            "wiki_page": "https://en.wikipedia.org/wiki/Five_Easy_Pieces"
        }),
        json!({
            "title": "Rosemary's Baby",
            "ethnicity": "American",
            "director": "Roman Polanski",
            "cast": "Mia Farrow, John Cassavetes",
            "genre": "horror",
            "plot": "A young couple moves into an apartment only to be surrounded by peculiar neighbors.",
            "year": "nineteen sixty-eight",
            "wiki_page": "https://en.wikipedia.org/wiki/Rosemary%27s_Baby_(film)"
        }),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| document(Some(i.to_string()), row))
        .collect()
}

/// Movies with Jack Nicholson not directed by Roman Polanski.
pub fn nicholson_not_polanski() -> SearchQuery {
    SearchQuery::from_clause(json!({
        "bool": {
            "must": { "match_phrase": { "cast": "jack nicholson" } },
            "filter": {
                "bool": {
                    "must_not": { "match_phrase": { "director": "roman polanski" } }
                }
            }
        }
    }))
}

/// Digital asset management index with nested key/value metadata.
pub fn dam_index() -> IndexSpec {
    IndexSpec::new(
        DAM_INDEX,
        json!({
            "properties": {
                "object_url": { "type": "text", "analyzer": "keyword" },
                "object_uri": { "type": "text", "analyzer": "keyword" },
                "object_fid": { "type": "text", "analyzer": "keyword" },
                "object_datetime": { "type": "date" },
                "thumb": {
                    "properties": {
                        "l": { "type": "text", "analyzer": "keyword" },
                        "m": { "type": "text", "analyzer": "keyword" },
                        "s": { "type": "text", "analyzer": "keyword" }
                    }
                },
                "tags": { "type": "keyword" },
                "key_value": {
                    "type": "nested",
                    "properties": {
                        "key": { "type": "keyword" },
                        "value": { "type": "keyword" }
                    }
                }
            }
        }),
    )
}

/// Four digital assets with thumbnails, tags and key/value pairs.
pub fn dam_documents() -> Vec<Document> {
    let assets: [(&[&str], &[(&str, &str)]); 4] = [
        (&["tag1", "tag2", "tag3"], &[("key1", "value1"), ("key2", "value2")]),
        (&["tag1", "tag3", "tag4"], &[("key1", "value1"), ("key3", "value3")]),
        (&["tag2", "tag3", "tag4"], &[("key2", "value2"), ("key3", "value3")]),
        (&["tag1", "tag2", "tag4"], &[("key1", "value1"), ("key2", "value2")]),
    ];

    assets
        .iter()
        .enumerate()
        .map(|(i, (tags, pairs))| {
            let n = i + 1;
            let key_value: Vec<Value> = pairs
                .iter()
                .map(|(key, value)| json!({ "key": key, "value": value }))
                .collect();
            document(
                random_id(),
                json!({
                    "object_url": format!("https://example.com/object{}", n),
                    "object_uri": format!("object{}", n),
                    "object_fid": format!("object{}", n),
                    "object_datetime": format!("2021-08-0{}T12:00:00", n),
                    "thumb": {
                        "l": format!("https://example.com/thumb{}_l", n),
                        "m": format!("https://example.com/thumb{}_m", n),
                        "s": format!("https://example.com/thumb{}_s", n)
                    },
                    "tags": tags,
                    "key_value": key_value
                }),
            )
        })
        .collect()
}

/// Assets carrying a tag.
pub fn dam_by_tag(tag: &str) -> SearchQuery {
    SearchQuery::from_clause(json!({ "term": { "tags": tag } }))
}

/// Assets with a given key/value pair in their nested metadata.
pub fn dam_by_key_value(key: &str, value: &str) -> SearchQuery {
    SearchQuery::from_clause(json!({
        "nested": {
            "path": "key_value",
            "query": {
                "bool": {
                    "must": [
                        { "term": { "key_value.key": key } },
                        { "term": { "key_value.value": value } }
                    ]
                }
            }
        }
    }))
}

/// Asset by its object id.
pub fn dam_by_object_id(object_fid: &str) -> SearchQuery {
    SearchQuery::from_clause(json!({ "term": { "object_fid": object_fid } }))
}
