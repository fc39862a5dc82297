//! Error types and error handling for repochat.
//!
//! This module defines the error type used throughout the crate.
//! Terminal fallbacks (no raw mode, user interrupt) are not errors
//! and never surface here; see `display::terminal::KeyError`.

use thiserror::Error;

/// Result type alias for repochat operations
pub type Result<T> = std::result::Result<T, ChatError>;

/// Main error type for repochat
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Indexing failed: {0}")]
    IndexingFailed(String),

    #[error("Search failed: {0}")]
    SearchFailed(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("GitHub request failed: {0}")]
    GitHubError(String),

    #[error("LLM request failed: {0}")]
    LlmError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl ChatError {
    /// Get user-friendly error message
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Check if this is a bad request error (invalid input)
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            ChatError::InvalidArgument(_)
                | ChatError::InvalidDocument(_)
                | ChatError::InvalidQuery(_)
                | ChatError::ConfigError(_)
        )
    }

    /// Check if this error came from a remote service
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ChatError::GitHubError(_) | ChatError::LlmError(_) | ChatError::HttpError(_)
        )
    }
}
