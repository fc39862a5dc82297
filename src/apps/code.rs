//! Code repository search.
//!
//! Markdown files are indexed as they are. Source files and notebooks
//! are first rewritten by the LLM into documentation, then everything
//! is chunked and indexed together.

use crate::apps::open_cache;
use crate::core::chunking::ChunkingParams;
use crate::core::config::{CodeConfig, Config};
use crate::core::document::{document, Document, CONTENT_FIELD, FILENAME_FIELD};
use crate::core::error::Result;
use crate::core::index::SearchIndex;
use crate::core::indexing::index_documents;
use crate::core::parallel::map_bounded;
use crate::display::results::ResultFields;
use crate::github::{GitHubClient, RawRepositoryFile, RepositoryReader};
use crate::interactive::{AppSettings, InteractiveSearch};
use crate::llm::{CodeProcessor, ResponsesClient};
use crate::parsing::frontmatter;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// How a repository file is turned into a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Markdown with optional frontmatter, used as is
    Document,
    /// Jupyter notebook, converted and edited by the LLM
    Notebook,
    /// Source file, documented by the LLM
    Code,
}

/// Extension sets for each file kind
#[derive(Debug, Clone, Default)]
pub struct FileKinds {
    document: HashSet<String>,
    notebook: HashSet<String>,
    code: HashSet<String>,
}

fn normalize(extensions: &[String]) -> HashSet<String> {
    extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
        .collect()
}

impl FileKinds {
    pub fn from_config(config: &CodeConfig) -> Self {
        Self {
            document: normalize(&config.document_extensions),
            notebook: normalize(&config.notebook_extensions),
            code: normalize(&config.code_extensions),
        }
    }

    pub fn classify(&self, extension: &str) -> Option<FileKind> {
        let ext = extension.to_ascii_lowercase();
        if self.document.contains(&ext) {
            Some(FileKind::Document)
        } else if self.notebook.contains(&ext) {
            Some(FileKind::Notebook)
        } else if self.code.contains(&ext) {
            Some(FileKind::Code)
        } else {
            None
        }
    }

    /// Every extension worth downloading
    pub fn extensions(&self) -> Vec<String> {
        let mut all: Vec<String> = self
            .document
            .iter()
            .chain(&self.notebook)
            .chain(&self.code)
            .cloned()
            .collect();
        all.sort();
        all
    }
}

/// Turn one repository file into a document.
///
/// `Ok(None)` means the file is of no kind we index.
pub async fn process_file(
    file: RawRepositoryFile,
    kinds: &FileKinds,
    processor: &CodeProcessor,
) -> Result<Option<Document>> {
    let Some(kind) = kinds.classify(&file.extension()) else {
        return Ok(None);
    };

    let mut doc = match kind {
        FileKind::Document => frontmatter::parse(&file.content),
        FileKind::Notebook => {
            let content = processor.process_notebook(&file.filename, &file.content).await?;
            document([(CONTENT_FIELD, Value::String(content))])
        }
        FileKind::Code => {
            let content = processor.process_code(&file.filename, &file.content).await?;
            document([(CONTENT_FIELD, Value::String(content))])
        }
    };

    doc.insert(FILENAME_FIELD.to_string(), Value::String(file.filename));
    Ok(Some(doc))
}

/// Process downloaded files with at most `max_workers` LLM calls in flight.
///
/// Files that fail to process are skipped with a warning.
pub async fn code_documents(
    files: Vec<RawRepositoryFile>,
    kinds: &FileKinds,
    processor: &CodeProcessor,
    max_workers: usize,
) -> Vec<Document> {
    let results = map_bounded("Processing files", files, max_workers, |file| async move {
        let filename = file.filename.clone();
        (filename, process_file(file, kinds, processor).await)
    })
    .await;

    let mut documents = Vec::with_capacity(results.len());
    for (filename, result) in results {
        match result {
            Ok(Some(doc)) => documents.push(doc),
            Ok(None) => tracing::debug!("Skipping unsupported file: {}", filename),
            Err(e) => tracing::warn!("Failed to process {}: {}", filename, e),
        }
    }
    documents
}

/// Interactive search over the code, notebooks and docs of one repository
pub struct CodeApp {
    reader: RepositoryReader,
    kinds: FileKinds,
    processor: CodeProcessor,
    chunk: bool,
    chunking: ChunkingParams,
    max_workers: usize,
    settings: AppSettings,
}

impl CodeApp {
    pub fn new(
        reader: RepositoryReader,
        kinds: FileKinds,
        processor: CodeProcessor,
        config: &Config,
        base: AppSettings,
    ) -> Self {
        let settings = base
            .with_questions(config.code.sample_questions.clone())
            .with_fields(ResultFields::default());

        Self {
            reader,
            kinds,
            processor,
            chunk: config.code.chunk,
            chunking: config.chunking.clone(),
            max_workers: config.parallel.max_workers,
            settings,
        }
    }

    /// Build the app; fails early when the LLM API key is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let code = &config.code;
        let kinds = FileKinds::from_config(code);

        let generator = ResponsesClient::from_config(&config.llm)?;
        let cache = open_cache(&config.cache)?;
        let processor = CodeProcessor::new(Arc::new(generator), Arc::new(cache));

        let client = GitHubClient::from_config(&config.github)?;
        let reader = RepositoryReader::new(client, code.owner.clone(), code.repo.clone())
            .with_extensions(kinds.extensions())
            .with_branch(config.github.branch.clone())
            .with_max_workers(config.parallel.max_workers);

        let base = AppSettings::new(
            "Code Search",
            format!("Search the code and docs of {}/{}", code.owner, code.repo),
        )
        .with_display(config.search.display)
        .with_num_results(config.search.num_results);

        Ok(Self::new(reader, kinds, processor, config, base))
    }
}

#[async_trait]
impl InteractiveSearch for CodeApp {
    fn settings(&self) -> &AppSettings {
        &self.settings
    }

    async fn load_data(&self) -> Result<SearchIndex> {
        let files = self.reader.read().await?;
        let documents = code_documents(files, &self.kinds, &self.processor, self.max_workers).await;
        tracing::info!("Prepared {} documents for indexing", documents.len());

        index_documents(documents, self.chunk, Some(self.chunking.clone()))
    }
}
