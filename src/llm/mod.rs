//! LLM text generation.
//!
//! Code files and notebooks are rewritten by a language model before
//! indexing so that search hits read as documentation rather than raw
//! source. Generation sits behind [`TextGenerator`] so the pipeline can
//! run against a stub.

mod openai;
mod processor;

pub use openai::ResponsesClient;
pub use processor::{CodeProcessor, CODE_DOC_PROMPT, NOTEBOOK_EDIT_PROMPT};

use crate::core::error::Result;
use async_trait::async_trait;

/// Something that turns instructions plus content into text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instructions: &str, content: &str) -> Result<String>;
}

/// Remove a surrounding markdown code fence, if any.
///
/// Models often wrap a whole answer in ```` ```markdown ... ``` ````.
/// The opening line (with its language tag) goes, and so does a
/// closing fence on the last line.
pub fn strip_code_fence(text: &str) -> String {
    let text = text.trim();
    if !text.starts_with("```") {
        return text.to_string();
    }

    let mut lines: Vec<&str> = text.lines().skip(1).collect();
    if lines.last().is_some_and(|l| l.trim() == "```") {
        lines.pop();
    }
    lines.join("\n")
}
