//! BM25 query execution.
//!
//! Questions typed by users are free text ("How to use X?"), so the
//! query is parsed leniently: syntax the parser cannot handle is
//! dropped instead of failing the search.

use crate::core::document::Document;
use crate::core::error::{ChatError, Result};
use crate::core::index::schema::IndexFields;
use std::collections::BTreeMap;
use tantivy::collector::TopDocs;
use tantivy::query::{BooleanQuery, Occur, Query, QueryParser, TermQuery};
use tantivy::schema::{IndexRecordOption, Value as _};
use tantivy::{Index, IndexReader, TantivyDocument, Term};

/// Per-query options
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Maximum number of results
    pub num_results: usize,

    /// Keyword field -> required exact value
    pub filters: BTreeMap<String, String>,

    /// Text field -> score multiplier
    pub boosts: BTreeMap<String, f32>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            num_results: 10,
            filters: BTreeMap::new(),
            boosts: BTreeMap::new(),
        }
    }
}

impl SearchOptions {
    pub fn with_limit(num_results: usize) -> Self {
        Self {
            num_results,
            ..Self::default()
        }
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn boost(mut self, field: impl Into<String>, weight: f32) -> Self {
        self.boosts.insert(field.into(), weight);
        self
    }
}

pub(crate) fn execute(
    index: &Index,
    reader: &IndexReader,
    fields: &IndexFields,
    query_str: &str,
    options: &SearchOptions,
) -> Result<Vec<(f32, Document)>> {
    if query_str.trim().is_empty() {
        return Err(ChatError::InvalidQuery(
            "Query cannot be empty".to_string(),
        ));
    }

    if options.num_results == 0 || fields.text.is_empty() {
        return Ok(Vec::new());
    }

    let mut parser = QueryParser::for_index(index, fields.text.iter().map(|(_, f)| *f).collect());
    for (name, weight) in &options.boosts {
        let field = fields.text_field(name).ok_or_else(|| {
            ChatError::InvalidQuery(format!("Cannot boost unknown text field '{name}'"))
        })?;
        parser.set_field_boost(field, *weight);
    }

    let (text_query, errors) = parser.parse_query_lenient(query_str);
    if !errors.is_empty() {
        tracing::debug!("Lenient parse dropped {} query fragment(s)", errors.len());
    }

    let query: Box<dyn Query> = if options.filters.is_empty() {
        text_query
    } else {
        let mut clauses: Vec<(Occur, Box<dyn Query>)> = vec![(Occur::Must, text_query)];
        for (name, value) in &options.filters {
            let field = fields.keyword_field(name).ok_or_else(|| {
                ChatError::InvalidQuery(format!("Cannot filter on unknown keyword field '{name}'"))
            })?;
            clauses.push((
                Occur::Must,
                Box::new(TermQuery::new(
                    Term::from_field_text(field, value),
                    IndexRecordOption::Basic,
                )),
            ));
        }
        Box::new(BooleanQuery::new(clauses))
    };

    let searcher = reader.searcher();
    let top_docs = searcher
        .search(&query, &TopDocs::with_limit(options.num_results))
        .map_err(|e| ChatError::SearchFailed(format!("Search failed: {e}")))?;

    let mut results = Vec::with_capacity(top_docs.len());
    for (score, address) in top_docs {
        let doc: TantivyDocument = searcher
            .doc(address)
            .map_err(|e| ChatError::SearchFailed(format!("Failed to retrieve document: {e}")))?;

        let json = doc
            .get_first(fields.stored)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ChatError::SearchFailed("Stored document missing".to_string()))?;

        results.push((score, serde_json::from_str(json)?));
    }

    Ok(results)
}
