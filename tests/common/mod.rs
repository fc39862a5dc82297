// Common test utilities and fixtures

pub mod fixtures;
pub mod terminal;

// Re-export commonly used items
// Note: These may appear unused in some test binaries
#[allow(unused_imports)]
pub use fixtures::{faq_documents, numbered_lines, repeated_text, search_results};
#[allow(unused_imports)]
pub use terminal::{MemoryConsole, ScriptedKeys};
