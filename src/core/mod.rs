//! Core domain logic
//!
//! Everything here works on in-memory documents and is independent of
//! GitHub, the LLM and the terminal.
//!
//! - **chunking**: sliding windows over text and documents
//! - **index**: in-memory Tantivy BM25 index
//! - **indexing**: chunk-then-index pipeline
//! - **config**: configuration loading (TOML + environment)
//! - **cache**: processed-content cache
//! - **parallel**: bounded concurrent mapping
//! - **document**, **error**, **xdg**

pub mod cache;
pub mod chunking;
pub mod config;
pub mod document;
pub mod error;
pub mod index;
pub mod indexing;
pub mod parallel;
pub mod xdg;

// Re-export key types for convenience
pub use config::Config;
pub use error::{ChatError, Result};
