//! Document records.
//!
//! A document is a field-keyed JSON object. Sources produce them,
//! the chunker rewrites them and the index stores and returns them
//! verbatim.

use serde_json::{Map, Value};

/// Field name -> value mapping
pub type Document = Map<String, Value>;

/// Default name of the field holding the document text
pub const CONTENT_FIELD: &str = "content";

/// Default name of the field used as a result title
pub const FILENAME_FIELD: &str = "filename";

/// Build a document from `(field, value)` pairs.
pub fn document<I, K, V>(fields: I) -> Document
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Render a field as display text.
///
/// Strings are returned as-is, `null` and missing fields yield
/// `None`, anything else is rendered as compact JSON.
pub fn field_text(doc: &Document, field: &str) -> Option<String> {
    match doc.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
