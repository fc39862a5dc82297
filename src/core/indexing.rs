//! Index construction from document collections.
//!
//! Coordinates the optional chunking step and the index build:
//! 1. Chunk documents (when requested)
//! 2. Fit a `SearchIndex` over the configured fields

use crate::core::chunking::{chunk_documents, ChunkingParams};
use crate::core::document::{Document, CONTENT_FIELD, FILENAME_FIELD};
use crate::core::error::Result;
use crate::core::index::SearchIndex;
use std::time::Instant;

/// Fields and chunking used to build an index
#[derive(Debug, Clone)]
pub struct IndexSpec {
    pub text_fields: Vec<String>,
    pub keyword_fields: Vec<String>,
    /// Chunk documents before indexing when set
    pub chunking: Option<ChunkingParams>,
}

impl Default for IndexSpec {
    fn default() -> Self {
        Self {
            text_fields: vec![CONTENT_FIELD.to_string(), FILENAME_FIELD.to_string()],
            keyword_fields: Vec::new(),
            chunking: None,
        }
    }
}

impl IndexSpec {
    pub fn chunked(mut self, params: ChunkingParams) -> Self {
        self.chunking = Some(params);
        self
    }
}

/// Build a searchable index over `content` and `filename`.
///
/// With `chunk` set, documents are split first using `params`, or the
/// default 2000/1000 windows when `params` is `None`.
pub fn index_documents<I>(documents: I, chunk: bool, params: Option<ChunkingParams>) -> Result<SearchIndex>
where
    I: IntoIterator<Item = Document>,
{
    let mut spec = IndexSpec::default();
    if chunk {
        spec = spec.chunked(params.unwrap_or_default());
    }
    build_index(documents, &spec)
}

/// Build an index following `spec`.
pub fn build_index<I>(documents: I, spec: &IndexSpec) -> Result<SearchIndex>
where
    I: IntoIterator<Item = Document>,
{
    let start = Instant::now();
    let mut index = SearchIndex::new(&spec.text_fields, &spec.keyword_fields)?;

    match &spec.chunking {
        Some(params) => {
            let chunks = chunk_documents(documents, params)?;
            tracing::info!(
                "Chunked documents into {} windows (size={}, step={})",
                chunks.len(),
                params.size,
                params.step
            );
            index.fit(chunks)?;
        }
        None => index.fit(documents)?,
    }

    tracing::info!(
        "Index built: {} documents in {}ms",
        index.doc_count(),
        start.elapsed().as_millis()
    );

    Ok(index)
}
