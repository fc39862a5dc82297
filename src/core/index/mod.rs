//! In-memory BM25 index over documents.
//!
//! `SearchIndex` is the lexical index the interactive apps query:
//! configure text and keyword fields, `fit` it with documents, then
//! `search` with free-text questions. Results are the stored source
//! documents, best match first.
//!
//! ```
//! use repochat::core::document::document;
//! use repochat::core::index::{SearchIndex, SearchOptions};
//! use serde_json::json;
//!
//! let mut index = SearchIndex::new(&["content".to_string()], &[]).unwrap();
//! index
//!     .fit(vec![document([("content", json!("streaming responses"))])])
//!     .unwrap();
//!
//! let results = index.search("streaming", &SearchOptions::default()).unwrap();
//! assert_eq!(results.len(), 1);
//! ```

mod schema;
mod search;

pub use schema::{IndexFields, DOC_FIELD};
pub use search::SearchOptions;

use crate::core::document::Document;
use crate::core::error::{ChatError, Result};
use tantivy::{Index, IndexReader, IndexWriter};

/// Writer heap budget
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Lexical search index
pub struct SearchIndex {
    fields: IndexFields,
    index: Index,
    reader: Option<IndexReader>,
    doc_count: usize,
}

impl std::fmt::Debug for SearchIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndex")
            .field("text_fields", &self.text_fields())
            .field("keyword_fields", &self.keyword_fields())
            .field("doc_count", &self.doc_count)
            .finish()
    }
}

impl SearchIndex {
    /// Create an empty index over the given fields.
    pub fn new(text_fields: &[String], keyword_fields: &[String]) -> Result<Self> {
        let fields = IndexFields::new(text_fields, keyword_fields)?;
        let index = Index::create_in_ram(fields.schema.clone());

        Ok(Self {
            fields,
            index,
            reader: None,
            doc_count: 0,
        })
    }

    /// Index `documents`, replacing anything indexed before.
    pub fn fit<I>(&mut self, documents: I) -> Result<()>
    where
        I: IntoIterator<Item = Document>,
    {
        self.index = Index::create_in_ram(self.fields.schema.clone());

        // One indexing thread keeps segment (and tie) order deterministic
        let mut writer: IndexWriter = self
            .index
            .writer_with_num_threads(1, WRITER_HEAP_BYTES)
            .map_err(|e| ChatError::IndexingFailed(format!("Failed to create writer: {e}")))?;

        let mut count = 0;
        for doc in documents {
            let tantivy_doc = self.fields.to_tantivy(&doc)?;
            writer
                .add_document(tantivy_doc)
                .map_err(|e| ChatError::IndexingFailed(format!("Failed to add document: {e}")))?;
            count += 1;
        }

        writer
            .commit()
            .map_err(|e| ChatError::IndexingFailed(format!("Failed to commit: {e}")))?;

        let reader = self
            .index
            .reader()
            .map_err(|e| ChatError::IndexingFailed(format!("Failed to create reader: {e}")))?;

        self.reader = Some(reader);
        self.doc_count = count;

        tracing::info!("Indexed {} documents", count);
        Ok(())
    }

    /// Number of documents indexed by the last `fit`
    pub fn doc_count(&self) -> usize {
        self.doc_count
    }

    pub fn is_fitted(&self) -> bool {
        self.reader.is_some()
    }

    pub fn text_fields(&self) -> Vec<&str> {
        self.fields.text.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn keyword_fields(&self) -> Vec<&str> {
        self.fields.keyword.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Search and return matching documents, best first.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<Document>> {
        Ok(self
            .search_scored(query, options)?
            .into_iter()
            .map(|(_, doc)| doc)
            .collect())
    }

    /// Search and return `(score, document)` pairs, best first.
    pub fn search_scored(&self, query: &str, options: &SearchOptions) -> Result<Vec<(f32, Document)>> {
        let Some(reader) = &self.reader else {
            return Err(ChatError::SearchFailed(
                "Index has not been fitted".to_string(),
            ));
        };

        search::execute(&self.index, reader, &self.fields, query, options)
    }
}
