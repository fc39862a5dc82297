//! Markdown frontmatter.
//!
//! Handles the flat YAML subset used by docs repositories: `key: value`
//! scalars (quoted strings, numbers, booleans, null), inline `[a, b]`
//! lists and block lists of `- item` lines. The document body becomes
//! the `content` field.

use crate::core::document::{Document, CONTENT_FIELD};
use serde_json::{Number, Value};

const DELIMITER: &str = "---";

/// Split `text` into frontmatter fields and body.
///
/// Text without a complete `---` block is all body.
pub fn split(text: &str) -> (Document, &str) {
    let stripped = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = strip_delimiter_line(stripped) else {
        return (Document::new(), text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let header = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (parse_header(header), body);
        }
        offset += line.len();
    }

    (Document::new(), text)
}

/// Parse `text` into a document: frontmatter fields plus `content`.
pub fn parse(text: &str) -> Document {
    let (mut doc, body) = split(text);
    doc.insert(CONTENT_FIELD.to_string(), Value::String(body.trim().to_string()));
    doc
}

fn strip_delimiter_line(text: &str) -> Option<&str> {
    let first_end = text.find('\n')?;
    if text[..first_end].trim_end() == DELIMITER {
        Some(&text[first_end + 1..])
    } else {
        None
    }
}

fn parse_header(header: &str) -> Document {
    let mut doc = Document::new();
    let mut list_key: Option<String> = None;

    for raw in header.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(item) = line.strip_prefix("- ").or_else(|| (line == "-").then_some("")) {
            if let Some(key) = &list_key {
                if let Some(Value::Array(items)) = doc.get_mut(key) {
                    items.push(scalar(item.trim()));
                }
                continue;
            }
        }

        let Some((key, value)) = line.split_once(':') else {
            tracing::debug!("Ignoring frontmatter line: {}", line);
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        let value = value.trim();
        if value.is_empty() {
            // Either null or the head of a block list
            doc.insert(key.to_string(), Value::Array(Vec::new()));
            list_key = Some(key.to_string());
        } else {
            doc.insert(key.to_string(), parse_value(value));
            list_key = None;
        }
    }

    // Keys that never received list items are plain nulls
    for value in doc.values_mut() {
        if matches!(value, Value::Array(items) if items.is_empty()) {
            *value = Value::Null;
        }
    }

    doc
}

fn parse_value(value: &str) -> Value {
    if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
        return Value::Array(
            inner
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(scalar)
                .collect(),
        );
    }
    scalar(value)
}

fn scalar(value: &str) -> Value {
    if let Some(quoted) = unquote(value) {
        return Value::String(quoted.to_string());
    }

    match value {
        "true" | "True" => return Value::Bool(true),
        "false" | "False" => return Value::Bool(false),
        "null" | "~" => return Value::Null,
        _ => {}
    }

    if let Ok(n) = value.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Some(n) = value.parse::<f64>().ok().and_then(Number::from_f64) {
        return Value::Number(n);
    }

    Value::String(value.to_string())
}

fn unquote(value: &str) -> Option<&str> {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return Some(&value[1..value.len() - 1]);
        }
    }
    None
}
