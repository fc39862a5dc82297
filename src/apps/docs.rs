//! Markdown FAQ search.
//!
//! Every markdown file is one FAQ entry: frontmatter fields (`question`,
//! `id`, ...) plus the body as `content`.

use crate::apps::{compile_patterns, matches_any};
use crate::core::chunking::ChunkingParams;
use crate::core::config::{Config, DocsConfig};
use crate::core::document::{Document, CONTENT_FIELD, FILENAME_FIELD};
use crate::core::error::Result;
use crate::core::index::SearchIndex;
use crate::core::indexing::{build_index, IndexSpec};
use crate::display::results::ResultFields;
use crate::github::{GitHubClient, RawRepositoryFile, RepositoryReader};
use crate::interactive::{AppSettings, InteractiveSearch};
use crate::parsing::frontmatter;
use async_trait::async_trait;
use serde_json::Value;

/// Interactive search over markdown docs of one repository
pub struct DocsApp {
    reader: RepositoryReader,
    config: DocsConfig,
    chunking: ChunkingParams,
    settings: AppSettings,
}

impl DocsApp {
    pub fn new(reader: RepositoryReader, config: DocsConfig, chunking: ChunkingParams, base: AppSettings) -> Self {
        // Chunks always carry their window in `content`
        let content_field = if config.chunk {
            CONTENT_FIELD.to_string()
        } else {
            config.content_field.clone()
        };
        let settings = base
            .with_questions(config.sample_questions.clone())
            .with_fields(ResultFields::new(content_field, config.title_field.clone()));

        Self {
            reader,
            config,
            chunking,
            settings,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let docs = &config.docs;
        let patterns = compile_patterns(&docs.include_patterns)?;

        let client = GitHubClient::from_config(&config.github)?;
        let reader = RepositoryReader::new(client, docs.owner.clone(), docs.repo.clone())
            .with_extensions(&docs.extensions)
            .with_filter(move |path| matches_any(&patterns, path))
            .with_branch(config.github.branch.clone())
            .with_max_workers(config.parallel.max_workers);

        let base = AppSettings::new(
            "FAQ Search",
            format!("Search the docs of {}/{}", docs.owner, docs.repo),
        )
        .with_display(config.search.display)
        .with_num_results(config.search.num_results);

        Ok(Self::new(reader, docs.clone(), config.chunking.clone(), base))
    }
}

/// Parse downloaded markdown files into FAQ documents.
pub fn docs_documents(files: Vec<RawRepositoryFile>) -> Vec<Document> {
    files
        .into_iter()
        .map(|file| {
            let mut doc = frontmatter::parse(&file.content);
            doc.insert(FILENAME_FIELD.to_string(), Value::String(file.filename));
            doc
        })
        .collect()
}

/// Index spec for FAQ documents
pub fn docs_index_spec(config: &DocsConfig, chunking: &ChunkingParams) -> IndexSpec {
    let spec = IndexSpec {
        text_fields: config.text_fields.clone(),
        keyword_fields: Vec::new(),
        chunking: None,
    };

    if config.chunk {
        spec.chunked(chunking.clone().with_content_field(config.content_field.clone()))
    } else {
        spec
    }
}

#[async_trait]
impl InteractiveSearch for DocsApp {
    fn settings(&self) -> &AppSettings {
        &self.settings
    }

    async fn load_data(&self) -> Result<SearchIndex> {
        let files = self.reader.read().await?;
        let documents = docs_documents(files);
        tracing::info!("Parsed {} FAQ entries", documents.len());

        build_index(documents, &docs_index_spec(&self.config, &self.chunking))
    }
}
