//! Source file parsing
//!
//! - **frontmatter**: markdown with a `---` metadata header
//! - **notebook**: Jupyter notebooks rendered as markdown

pub mod frontmatter;
pub mod notebook;
