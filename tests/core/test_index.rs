// BM25 index integration tests

use crate::common::{faq_documents, repeated_text};
use repochat::core::chunking::ChunkingParams;
use repochat::core::document::document;
use repochat::core::index::{SearchIndex, SearchOptions};
use repochat::core::indexing::{build_index, index_documents, IndexSpec};
use serde_json::json;

fn faq_index() -> SearchIndex {
    let spec = IndexSpec {
        text_fields: vec!["question".to_string(), "content".to_string(), "filename".to_string()],
        keyword_fields: Vec::new(),
        chunking: None,
    };
    build_index(faq_documents(), &spec).unwrap()
}

#[test]
fn test_free_text_questions() {
    let index = faq_index();

    let results = index
        .search("How do I run Docker on Windows?", &SearchOptions::default())
        .unwrap();
    assert_eq!(results[0]["filename"], json!("module-1/docker-windows.md"));

    let results = index
        .search("postgres port already in use", &SearchOptions::default())
        .unwrap();
    assert_eq!(results[0]["filename"], json!("module-1/postgres-port.md"));
}

#[test]
fn test_results_are_stored_documents() {
    let index = faq_index();
    let results = index.search("terraform credentials", &SearchOptions::default()).unwrap();

    assert_eq!(results[0], faq_documents()[3]);
}

#[test]
fn test_query_syntax_does_not_fail() {
    let index = faq_index();

    for query in ["docker AND", "\"unterminated", "title:(", "c++ && ||", "what? (really)"] {
        assert!(index.search(query, &SearchOptions::default()).is_ok(), "{query}");
    }
}

#[test]
fn test_limit_and_no_match() {
    let index = faq_index();

    let results = index.search("docker postgres terraform course", &SearchOptions::with_limit(2)).unwrap();
    assert_eq!(results.len(), 2);

    let results = index.search("kubernetes", &SearchOptions::default()).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_chunked_index_returns_windows() {
    let long = format!("{}kafka streaming{}", repeated_text("filler", 400), repeated_text("filler", 400));
    let docs = vec![
        document([("filename", json!("streaming.md")), ("content", json!(long))]),
        document([("filename", json!("batch.md")), ("content", json!("spark batch jobs"))]),
    ];

    let index = index_documents(docs, true, Some(ChunkingParams::new(500, 250))).unwrap();
    assert!(index.doc_count() > 2);

    let results = index.search("kafka", &SearchOptions::default()).unwrap();
    assert!(!results.is_empty());
    for hit in &results {
        assert_eq!(hit["filename"], json!("streaming.md"));
        assert!(hit["content"].as_str().unwrap().contains("kafka"));
        assert!(hit["content"].as_str().unwrap().chars().count() <= 500);
    }
}

#[test]
fn test_refit_replaces_documents() {
    let mut index = SearchIndex::new(&["content".to_string()], &[]).unwrap();

    index.fit(vec![document([("content", json!("first corpus"))])]).unwrap();
    index.fit(vec![document([("content", json!("second corpus"))])]).unwrap();

    assert_eq!(index.doc_count(), 1);
    assert!(index.search("first", &SearchOptions::default()).unwrap().is_empty());
}
