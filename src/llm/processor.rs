use crate::core::cache::ContentCache;
use crate::core::error::Result;
use crate::llm::{strip_code_fence, TextGenerator};
use crate::parsing::notebook;
use std::sync::Arc;

/// Instructions for documenting a source file
pub const CODE_DOC_PROMPT: &str = include_str!("../../prompts/code_doc.md");

/// Instructions for cleaning up an exported notebook
pub const NOTEBOOK_EDIT_PROMPT: &str = include_str!("../../prompts/notebook_edit.md");

/// Rewrites code and notebooks into searchable markdown.
///
/// Output is cached by repository path, so files already processed in
/// an earlier run cost nothing.
#[derive(Clone)]
pub struct CodeProcessor {
    generator: Arc<dyn TextGenerator>,
    cache: Arc<ContentCache>,
}

impl CodeProcessor {
    pub fn new(generator: Arc<dyn TextGenerator>, cache: Arc<ContentCache>) -> Self {
        Self { generator, cache }
    }

    /// Document a source file.
    pub async fn process_code(&self, filename: &str, code: &str) -> Result<String> {
        if let Some(cached) = self.cache.get(filename) {
            tracing::debug!("Cache hit: {}", filename);
            return Ok(cached);
        }

        tracing::info!("Processing code file: {}", filename);
        self.generate_and_cache(filename, CODE_DOC_PROMPT.trim(), code)
            .await
    }

    /// Convert a notebook to markdown and edit it into a tutorial.
    pub async fn process_notebook(&self, filename: &str, raw: &str) -> Result<String> {
        if let Some(cached) = self.cache.get(filename) {
            tracing::debug!("Cache hit: {}", filename);
            return Ok(cached);
        }

        tracing::info!("Processing notebook file: {}", filename);
        let markdown = notebook::to_markdown(raw)?;
        self.generate_and_cache(filename, NOTEBOOK_EDIT_PROMPT.trim(), &markdown)
            .await
    }

    async fn generate_and_cache(&self, filename: &str, instructions: &str, content: &str) -> Result<String> {
        let output = self.generator.generate(instructions, content).await?;
        let output = strip_code_fence(&output);

        if let Err(e) = self.cache.set(filename, output.as_str()) {
            tracing::warn!("Failed to cache {}: {}", filename, e);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ChatError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Echoes the content back inside a fence and records every call
    #[derive(Default)]
    struct EchoGenerator {
        calls: Mutex<Vec<(String, String)>>,
    }

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn generate(&self, instructions: &str, content: &str) -> Result<String> {
            self.calls
                .lock()
                .unwrap()
                .push((instructions.to_string(), content.to_string()));
            Ok(format!("```markdown\nDOC: {content}\n```"))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _: &str, _: &str) -> Result<String> {
            Err(ChatError::LlmError("429 rate limited".to_string()))
        }
    }

    #[tokio::test]
    async fn test_process_code_strips_fence_and_caches() {
        let generator = Arc::new(EchoGenerator::default());
        let cache = Arc::new(ContentCache::in_memory());
        let processor = CodeProcessor::new(generator.clone(), cache.clone());

        let out = processor.process_code("a.py", "print(1)").await.unwrap();
        assert_eq!(out, "DOC: print(1)");
        assert_eq!(cache.get("a.py").as_deref(), Some("DOC: print(1)"));

        // Second call is served from the cache
        processor.process_code("a.py", "print(1)").await.unwrap();
        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, CODE_DOC_PROMPT.trim());
    }

    #[tokio::test]
    async fn test_process_notebook_sends_markdown() {
        let generator = Arc::new(EchoGenerator::default());
        let processor = CodeProcessor::new(generator.clone(), Arc::new(ContentCache::in_memory()));

        let raw = r#"{"cells": [{"cell_type": "code", "source": "x = 1", "outputs": []}], "metadata": {}}"#;
        let out = processor.process_notebook("nb.ipynb", raw).await.unwrap();

        assert!(out.contains("```python\nx = 1\n```"));
        let calls = generator.calls.lock().unwrap();
        assert_eq!(calls[0].0, NOTEBOOK_EDIT_PROMPT.trim());
    }

    #[tokio::test]
    async fn test_generation_error_is_not_cached() {
        let cache = Arc::new(ContentCache::in_memory());
        let processor = CodeProcessor::new(Arc::new(FailingGenerator), cache.clone());

        let err = processor.process_code("a.sql", "SELECT 1").await.unwrap_err();
        assert!(err.is_remote());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_prompts_are_bundled() {
        assert!(!CODE_DOC_PROMPT.trim().is_empty());
        assert!(!NOTEBOOK_EDIT_PROMPT.trim().is_empty());
    }
}
