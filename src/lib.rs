//! repochat - Chat with GitHub data from the terminal
//!
//! Downloads issues, markdown docs or source code from a GitHub
//! repository, splits long texts into overlapping windows, indexes
//! them with BM25 (Tantivy) and shows the answers to typed questions
//! in a keyboard-driven pager.
//!
//! # Architecture
//!
//! - **core**: chunking, index, config, cache, errors (no I/O to GitHub)
//! - **github**: REST client, issues and repository readers
//! - **parsing**: frontmatter and notebook conversion
//! - **llm**: text generation used to document code before indexing
//! - **display**: pager, navigator and terminal capabilities
//! - **interactive**: the question loop shared by all apps
//! - **apps**: issues, docs and code search
//! - **cli**: clap adapter

pub mod apps;
pub mod cli;
pub mod core;
pub mod display;
pub mod github;
pub mod interactive;
pub mod llm;
pub mod parsing;

// Re-export commonly used types for convenience
pub use core::chunking::{chunk_documents, sliding_window, ChunkingParams};
pub use core::config::Config;
pub use core::document::Document;
pub use core::error::{ChatError, Result};
pub use core::index::{SearchIndex, SearchOptions};
pub use core::indexing::index_documents;
