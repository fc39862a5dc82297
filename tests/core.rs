//! Core module integration tests
//!
//! Tests for terminal-independent functionality:
//! - Chunking: sliding windows over text and documents
//! - Index: BM25 search over chunked and whole documents

mod common;

// Core submodules - tests/core/ directory
mod core {
    pub mod test_chunking;
    pub mod test_index;
}
