//! Configuration management for repochat.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! The sample questions and field names of each interactive app live
//! here too, so nothing about an app is process-wide state.

use crate::core::chunking::ChunkingParams;
use crate::core::error::{ChatError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingParams,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub parallel: ParallelConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub issues: IssuesConfig,
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub code: CodeConfig,
}

/// How search results are shown
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// One scrollable buffer with all results
    #[default]
    Pager,
    /// One result per screen
    Navigator,
}

impl std::str::FromStr for DisplayMode {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pager" => Ok(Self::Pager),
            "navigator" => Ok(Self::Navigator),
            other => Err(ChatError::ConfigError(format!(
                "Unknown display mode '{other}' (expected 'pager' or 'navigator')"
            ))),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Number of results returned per query
    #[serde(default = "default_num_results")]
    pub num_results: usize,

    /// Result display mode
    #[serde(default)]
    pub display: DisplayMode,
}

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    #[serde(default = "default_github_api_url")]
    pub api_url: String,

    /// Environment variable holding the API token
    #[serde(default = "default_github_token_env")]
    pub token_env: String,

    /// Items per page for paginated endpoints (max 100)
    #[serde(default = "default_per_page")]
    pub per_page: usize,

    /// Branch to read repositories from (default branch when unset)
    #[serde(default)]
    pub branch: Option<String>,
}

/// LLM configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_api_url")]
    pub api_url: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_llm_api_key_env")]
    pub api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_sec: u64,
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ParallelConfig {
    /// Maximum in-flight tasks for I/O-bound mapping
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
}

/// Processed-content cache configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cache file (XDG cache dir when unset)
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// GitHub issues search app
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IssuesConfig {
    #[serde(default = "default_issues_owner")]
    pub owner: String,
    #[serde(default = "default_issues_repo")]
    pub repo: String,
    /// Issue state requested from the API: open, closed or all
    #[serde(default = "default_issue_state")]
    pub state: String,
    /// Dot-separated paths selected from each issue
    #[serde(default = "default_issue_fields")]
    pub fields: Vec<String>,
    #[serde(default = "default_issue_text_fields")]
    pub text_fields: Vec<String>,
    #[serde(default = "default_issue_keyword_fields")]
    pub keyword_fields: Vec<String>,
    #[serde(default = "default_issue_content_field")]
    pub content_field: String,
    #[serde(default = "default_issue_title_field")]
    pub title_field: String,
    #[serde(default = "default_issue_questions")]
    pub sample_questions: Vec<String>,
}

/// Markdown docs (FAQ) search app
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DocsConfig {
    #[serde(default = "default_docs_owner")]
    pub owner: String,
    #[serde(default = "default_docs_repo")]
    pub repo: String,
    #[serde(default = "default_docs_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns a file path must match (all files when empty)
    #[serde(default = "default_docs_include")]
    pub include_patterns: Vec<String>,
    #[serde(default = "default_docs_text_fields")]
    pub text_fields: Vec<String>,
    #[serde(default = "default_content_field")]
    pub content_field: String,
    #[serde(default = "default_docs_title_field")]
    pub title_field: String,
    #[serde(default)]
    pub chunk: bool,
    #[serde(default = "default_docs_questions")]
    pub sample_questions: Vec<String>,
}

/// Code, notebook and docs search app
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CodeConfig {
    #[serde(default = "default_code_owner")]
    pub owner: String,
    #[serde(default = "default_code_repo")]
    pub repo: String,
    #[serde(default = "default_document_extensions")]
    pub document_extensions: Vec<String>,
    #[serde(default = "default_notebook_extensions")]
    pub notebook_extensions: Vec<String>,
    #[serde(default = "default_code_extensions")]
    pub code_extensions: Vec<String>,
    #[serde(default = "default_true")]
    pub chunk: bool,
    #[serde(default = "default_code_questions")]
    pub sample_questions: Vec<String>,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_num_results() -> usize {
    10
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_github_token_env() -> String {
    "GITHUB_API_TOKEN".to_string()
}

fn default_per_page() -> usize {
    100
}

fn default_llm_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_llm_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

fn default_max_workers() -> usize {
    6
}

fn default_content_field() -> String {
    "content".to_string()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_issues_owner() -> String {
    "pydantic".to_string()
}

fn default_issues_repo() -> String {
    "pydantic-ai".to_string()
}

fn default_issue_state() -> String {
    "open".to_string()
}

fn default_issue_fields() -> Vec<String> {
    strings(&["url", "title", "user.login", "assignee.login", "state", "body"])
}

fn default_issue_text_fields() -> Vec<String> {
    strings(&["title", "body"])
}

fn default_issue_keyword_fields() -> Vec<String> {
    strings(&["state"])
}

fn default_issue_content_field() -> String {
    "body".to_string()
}

fn default_issue_title_field() -> String {
    "url".to_string()
}

fn default_issue_questions() -> Vec<String> {
    strings(&[
        "Streaming",
        "deepseek",
        "chat completions api",
        "How to use pydantic-ai with fastapi?",
    ])
}

fn default_docs_owner() -> String {
    "DataTalksClub".to_string()
}

fn default_docs_repo() -> String {
    "faq".to_string()
}

fn default_docs_extensions() -> Vec<String> {
    strings(&["md", "mdx"])
}

fn default_docs_include() -> Vec<String> {
    strings(&["**/data-engineering-zoomcamp/**"])
}

fn default_docs_text_fields() -> Vec<String> {
    strings(&["question", "content", "filename"])
}

fn default_docs_title_field() -> String {
    "filename".to_string()
}

fn default_docs_questions() -> Vec<String> {
    strings(&[
        "How do I run the course with Docker on Windows?",
        "Can I still join the course after the start date?",
        "What should I do if Terraform cannot find my credentials?",
        "How do I fix a port already in use error for Postgres?",
        "Where do I submit my homework?",
    ])
}

fn default_code_owner() -> String {
    "DataTalksClub".to_string()
}

fn default_code_repo() -> String {
    "data-engineering-zoomcamp".to_string()
}

fn default_document_extensions() -> Vec<String> {
    strings(&["md", "mdx"])
}

fn default_notebook_extensions() -> Vec<String> {
    strings(&["ipynb"])
}

fn default_code_extensions() -> Vec<String> {
    strings(&["py", "sql", "java"])
}

fn default_code_questions() -> Vec<String> {
    strings(&[
        "What is data versioning and why is it important?",
        "Explain the concept of data lineage.",
        "How to set up a data pipeline using Airflow?",
        "What are the best practices for data quality management?",
        "Describe the differences between batch and stream processing.",
        "How to optimize SQL queries for large datasets?",
        "What is the role of a data engineer in a data team?",
        "Explain the concept of ETL and ELT.",
        "How to use Docker for data engineering projects?",
        "What are some common challenges in data engineering and how to overcome them?",
    ])
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            num_results: default_num_results(),
            display: DisplayMode::default(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api_url(),
            token_env: default_github_token_env(),
            per_page: default_per_page(),
            branch: None,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: default_llm_api_url(),
            model: default_llm_model(),
            api_key_env: default_llm_api_key_env(),
            timeout_sec: default_llm_timeout(),
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            max_workers: default_max_workers(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl Default for IssuesConfig {
    fn default() -> Self {
        Self {
            owner: default_issues_owner(),
            repo: default_issues_repo(),
            state: default_issue_state(),
            fields: default_issue_fields(),
            text_fields: default_issue_text_fields(),
            keyword_fields: default_issue_keyword_fields(),
            content_field: default_issue_content_field(),
            title_field: default_issue_title_field(),
            sample_questions: default_issue_questions(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            owner: default_docs_owner(),
            repo: default_docs_repo(),
            extensions: default_docs_extensions(),
            include_patterns: default_docs_include(),
            text_fields: default_docs_text_fields(),
            content_field: default_content_field(),
            title_field: default_docs_title_field(),
            chunk: false,
            sample_questions: default_docs_questions(),
        }
    }
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            owner: default_code_owner(),
            repo: default_code_repo(),
            document_extensions: default_document_extensions(),
            notebook_extensions: default_notebook_extensions(),
            code_extensions: default_code_extensions(),
            chunk: true,
            sample_questions: default_code_questions(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| ChatError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. REPOCHAT_CONFIG env var
    /// 2. XDG config file (~/.config/repochat/config.toml)
    /// 3. ./repochat.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("REPOCHAT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("repochat.toml").exists() {
                Self::from_file("repochat.toml")?
            } else {
                Self::default()
            }
        };

        if config.cache.path.is_none() {
            config.cache.path = Some(xdg.llm_cache_file());
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(size) = env::var("REPOCHAT_CHUNK_SIZE") {
            if let Ok(size) = size.parse() {
                self.chunking.size = size;
            }
        }
        if let Ok(step) = env::var("REPOCHAT_CHUNK_STEP") {
            if let Ok(step) = step.parse() {
                self.chunking.step = step;
            }
        }
        if let Ok(num) = env::var("REPOCHAT_NUM_RESULTS") {
            if let Ok(num) = num.parse() {
                self.search.num_results = num;
            }
        }
        if let Ok(display) = env::var("REPOCHAT_DISPLAY") {
            match display.parse() {
                Ok(mode) => self.search.display = mode,
                Err(e) => tracing::warn!("Ignoring REPOCHAT_DISPLAY: {}", e),
            }
        }
        if let Ok(workers) = env::var("REPOCHAT_MAX_WORKERS") {
            if let Ok(workers) = workers.parse() {
                self.parallel.max_workers = workers;
            }
        }
        if let Ok(model) = env::var("REPOCHAT_LLM_MODEL") {
            if !model.trim().is_empty() {
                self.llm.model = model;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.chunking.size == 0 || self.chunking.step == 0 {
            return Err(ChatError::ConfigError(
                "Chunk size and step must be non-zero".to_string(),
            ));
        }

        if self.chunking.content_field.trim().is_empty() {
            return Err(ChatError::ConfigError(
                "Chunk content field cannot be empty".to_string(),
            ));
        }

        if self.search.num_results == 0 {
            return Err(ChatError::ConfigError(
                "Number of results must be non-zero".to_string(),
            ));
        }

        if self.github.per_page == 0 || self.github.per_page > 100 {
            return Err(ChatError::ConfigError(
                "GitHub per_page must be between 1 and 100".to_string(),
            ));
        }

        if self.parallel.max_workers == 0 {
            return Err(ChatError::ConfigError(
                "Max workers must be non-zero".to_string(),
            ));
        }

        for (app, owner, repo) in [
            ("issues", &self.issues.owner, &self.issues.repo),
            ("docs", &self.docs.owner, &self.docs.repo),
            ("code", &self.code.owner, &self.code.repo),
        ] {
            if owner.trim().is_empty() || repo.trim().is_empty() {
                return Err(ChatError::ConfigError(format!(
                    "[{app}] owner and repo must be set"
                )));
            }
        }

        if !matches!(self.issues.state.as_str(), "open" | "closed" | "all") {
            return Err(ChatError::ConfigError(format!(
                "[issues] state must be open, closed or all, got '{}'",
                self.issues.state
            )));
        }

        for pattern in &self.docs.include_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                ChatError::ConfigError(format!("Invalid docs include pattern '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }

    /// Log configuration (redacting sensitive values)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!(
            "  Chunking: size={} step={} field={}",
            self.chunking.size,
            self.chunking.step,
            self.chunking.content_field
        );
        tracing::info!("  Results per query: {}", self.search.num_results);
        tracing::info!("  Display: {:?}", self.search.display);
        tracing::info!("  GitHub API: {}", self.github.api_url);
        tracing::info!(
            "  GitHub token: {}",
            if env::var(&self.github.token_env).is_ok() {
                "set"
            } else {
                "not set"
            }
        );
        tracing::info!("  LLM: {} at {}", self.llm.model, self.llm.api_url);
        tracing::info!("  Max workers: {}", self.parallel.max_workers);
        tracing::info!(
            "  Cache: {} ({:?})",
            if self.cache.enabled { "on" } else { "off" },
            self.cache.path
        );
    }
}
