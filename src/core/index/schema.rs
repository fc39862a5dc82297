//! Tantivy schema for document indexing.
//!
//! Documents are arbitrary field maps, so the schema is built from the
//! field lists an index is configured with:
//!
//! - text fields: tokenized, BM25-searchable (TEXT)
//! - keyword fields: exact-match filters (STRING)
//! - `__doc`: the whole source document as JSON (STORED)

use crate::core::document::Document;
use crate::core::error::{ChatError, Result};
use serde_json::Value;
use std::collections::HashSet;
use tantivy::schema::{Field, Schema, STORED, STRING, TEXT};
use tantivy::TantivyDocument;

/// Stored field holding the serialized source document
pub const DOC_FIELD: &str = "__doc";

/// Resolved schema fields for one index
#[derive(Debug, Clone)]
pub struct IndexFields {
    pub schema: Schema,
    pub text: Vec<(String, Field)>,
    pub keyword: Vec<(String, Field)>,
    pub stored: Field,
}

impl IndexFields {
    /// Build a schema for the given text and keyword fields.
    pub fn new(text_fields: &[String], keyword_fields: &[String]) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in text_fields.iter().chain(keyword_fields) {
            if name.is_empty() || name.starts_with('-') || name == DOC_FIELD {
                return Err(ChatError::InvalidArgument(format!(
                    "Invalid index field name '{name}'"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ChatError::InvalidArgument(format!(
                    "Field '{name}' is configured more than once"
                )));
            }
        }

        let mut builder = Schema::builder();

        let text = text_fields
            .iter()
            .map(|name| (name.clone(), builder.add_text_field(name, TEXT)))
            .collect();
        let keyword = keyword_fields
            .iter()
            .map(|name| (name.clone(), builder.add_text_field(name, STRING)))
            .collect();
        let stored = builder.add_text_field(DOC_FIELD, STORED);

        Ok(Self {
            schema: builder.build(),
            text,
            keyword,
            stored,
        })
    }

    /// Look up a keyword field by name
    pub fn keyword_field(&self, name: &str) -> Option<Field> {
        self.keyword
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| *f)
    }

    /// Look up a text field by name
    pub fn text_field(&self, name: &str) -> Option<Field> {
        self.text.iter().find(|(n, _)| n == name).map(|(_, f)| *f)
    }

    /// Convert a source document into a Tantivy document.
    ///
    /// Missing and `null` fields are simply not indexed.
    pub fn to_tantivy(&self, doc: &Document) -> Result<TantivyDocument> {
        let mut out = TantivyDocument::default();

        for (name, field) in self.text.iter().chain(&self.keyword) {
            if let Some(value) = doc.get(name) {
                for text in indexable_text(value) {
                    out.add_text(*field, text);
                }
            }
        }

        out.add_text(self.stored, serde_json::to_string(doc)?);
        Ok(out)
    }
}

/// Flatten a JSON value into the strings worth indexing.
fn indexable_text(value: &Value) -> Vec<String> {
    match value {
        Value::Null => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Bool(b) => vec![b.to_string()],
        Value::Number(n) => vec![n.to_string()],
        Value::Array(items) => items.iter().flat_map(indexable_text).collect(),
        Value::Object(_) => vec![value.to_string()],
    }
}
