//! Sliding-window chunking.
//!
//! Splits a sequence into fixed-size windows that start every `step`
//! elements. Windows overlap when `step < size` and leave gaps when
//! `step > size`. The last window is the true tail of the sequence
//! and may be shorter than `size`.
//!
//! Text is measured in **characters**, never bytes, so window
//! boundaries always fall on UTF-8 character boundaries.
//!
//! # Example
//!
//! ```
//! use repochat::core::chunking::sliding_window_text;
//!
//! let windows = sliding_window_text("hello world", 5, 3).unwrap();
//! let starts: Vec<usize> = windows.iter().map(|w| w.start).collect();
//! assert_eq!(starts, vec![0, 3, 6, 9]);
//! assert_eq!(windows[3].content, "ld");
//! ```

use crate::core::document::{Document, CONTENT_FIELD};
use crate::core::error::{ChatError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contiguous slice of a sequence tagged with its starting offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Window<T> {
    pub start: usize,
    pub content: T,
}

/// An indexable, sliceable ordered sequence.
pub trait Sequence {
    /// Owned form of a sub-sequence
    type Slice;

    /// Number of elements
    fn seq_len(&self) -> usize;

    /// Elements `[start, end)`. Callers guarantee `start <= end <= seq_len()`.
    fn slice(&self, start: usize, end: usize) -> Self::Slice;
}

impl<T: Clone> Sequence for [T] {
    type Slice = Vec<T>;

    fn seq_len(&self) -> usize {
        self.len()
    }

    fn slice(&self, start: usize, end: usize) -> Vec<T> {
        self[start..end].to_vec()
    }
}

/// UTF-8 text addressed by character position.
#[derive(Debug, Clone)]
pub struct Text<'a> {
    text: &'a str,
    /// Byte offset of every character, followed by `text.len()`
    boundaries: Vec<usize>,
}

impl<'a> Text<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        boundaries.push(text.len());
        Self { text, boundaries }
    }
}

impl Sequence for Text<'_> {
    type Slice = String;

    fn seq_len(&self) -> usize {
        self.boundaries.len() - 1
    }

    fn slice(&self, start: usize, end: usize) -> String {
        self.text[self.boundaries[start]..self.boundaries[end]].to_string()
    }
}

/// Split `sequence` into windows of `size` elements starting every `step`.
///
/// Fails with [`ChatError::InvalidArgument`] when `size` or `step` is
/// zero, whatever the input. An empty sequence yields no windows.
pub fn sliding_window<S>(sequence: &S, size: usize, step: usize) -> Result<Vec<Window<S::Slice>>>
where
    S: Sequence + ?Sized,
{
    if size == 0 || step == 0 {
        return Err(ChatError::InvalidArgument(
            "size and step must be positive".to_string(),
        ));
    }

    let len = sequence.seq_len();
    let mut windows = Vec::new();
    let mut start = 0;

    while start < len {
        let end = (start + size).min(len);
        windows.push(Window {
            start,
            content: sequence.slice(start, end),
        });

        // A window cut short by the end of the sequence is the tail
        if start + size > len {
            break;
        }
        start += step;
    }

    Ok(windows)
}

/// [`sliding_window`] over the characters of `text`.
pub fn sliding_window_text(text: &str, size: usize, step: usize) -> Result<Vec<Window<String>>> {
    sliding_window(&Text::new(text), size, step)
}

/// Chunking parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChunkingParams {
    /// Characters per window
    #[serde(default = "default_size")]
    pub size: usize,

    /// Characters between consecutive window starts
    #[serde(default = "default_step")]
    pub step: usize,

    /// Field holding the text to split
    #[serde(default = "default_content_field")]
    pub content_field: String,
}

fn default_size() -> usize {
    2000
}

fn default_step() -> usize {
    1000
}

fn default_content_field() -> String {
    CONTENT_FIELD.to_string()
}

impl Default for ChunkingParams {
    fn default() -> Self {
        Self {
            size: default_size(),
            step: default_step(),
            content_field: default_content_field(),
        }
    }
}

impl ChunkingParams {
    pub fn new(size: usize, step: usize) -> Self {
        Self {
            size,
            step,
            ..Self::default()
        }
    }

    pub fn with_content_field(mut self, field: impl Into<String>) -> Self {
        self.content_field = field.into();
        self
    }
}

/// Split every document into windowed chunks.
///
/// Each chunk carries `start` and `content` (the window) plus every
/// other field of its source document, unchanged. The source content
/// field itself is not copied. Chunks keep the input order.
///
/// The window values take precedence: a source field already named
/// `start` or `content` is replaced in every chunk.
///
/// Documents whose content field is missing or `null` produce no
/// chunks; a non-string content field is an error.
pub fn chunk_documents<I>(documents: I, params: &ChunkingParams) -> Result<Vec<Document>>
where
    I: IntoIterator<Item = Document>,
{
    if params.size == 0 || params.step == 0 {
        return Err(ChatError::InvalidArgument(
            "size and step must be positive".to_string(),
        ));
    }

    let mut chunks = Vec::new();

    for mut doc in documents {
        let content = match doc.remove(&params.content_field) {
            Some(Value::String(text)) => text,
            None | Some(Value::Null) => {
                tracing::debug!(
                    "Skipping document without '{}' field",
                    params.content_field
                );
                continue;
            }
            Some(other) => {
                return Err(ChatError::InvalidDocument(format!(
                    "field '{}' must be a string, got {}",
                    params.content_field,
                    json_type(&other)
                )));
            }
        };

        for field in ["start", "content"] {
            if doc.contains_key(field) {
                tracing::debug!("Window value replaces source field '{}'", field);
            }
        }

        for window in sliding_window_text(&content, params.size, params.step)? {
            let mut chunk = doc.clone();
            chunk.insert("start".to_string(), Value::from(window.start));
            chunk.insert("content".to_string(), Value::String(window.content));
            chunks.push(chunk);
        }
    }

    Ok(chunks)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
