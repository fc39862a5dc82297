//! The three interactive search apps
//!
//! - **issues**: GitHub issues of one repository
//! - **docs**: markdown FAQ entries with frontmatter
//! - **code**: code, notebooks and docs, rewritten by an LLM
//!
//! Each app turns its downloaded data into documents with a pure
//! function (`issue_documents`, `docs_documents`, `code_documents`)
//! and implements `InteractiveSearch` on top of it.

pub mod code;
pub mod docs;
pub mod issues;

pub use code::CodeApp;
pub use docs::DocsApp;
pub use issues::IssuesApp;

use crate::core::cache::ContentCache;
use crate::core::config::CacheConfig;
use crate::core::error::{ChatError, Result};
use crate::core::xdg::XdgDirs;
use glob::Pattern;

/// Open the processed-content cache described by `config`.
///
/// A disabled cache still deduplicates work within one run.
pub fn open_cache(config: &CacheConfig) -> Result<ContentCache> {
    if !config.enabled {
        return Ok(ContentCache::in_memory());
    }

    let path = config
        .path
        .clone()
        .unwrap_or_else(|| XdgDirs::new().llm_cache_file());
    ContentCache::open(path)
}

/// Compile glob patterns for repository paths
pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| {
            Pattern::new(p)
                .map_err(|e| ChatError::ConfigError(format!("Invalid include pattern '{p}': {e}")))
        })
        .collect()
}

/// Whether `path` matches any pattern (every path when there are none)
pub fn matches_any(patterns: &[Pattern], path: &str) -> bool {
    patterns.is_empty() || patterns.iter().any(|p| p.matches(path))
}
