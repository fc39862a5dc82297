//! Jupyter notebook to markdown.
//!
//! Outputs are dropped; markdown and raw cells are copied verbatim and
//! code cells become fenced blocks tagged with the kernel language.

use crate::core::error::{ChatError, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Notebook {
    #[serde(default)]
    cells: Vec<Cell>,
    #[serde(default)]
    metadata: NotebookMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct NotebookMetadata {
    #[serde(default)]
    kernelspec: Option<KernelSpec>,
    #[serde(default)]
    language_info: Option<LanguageInfo>,
}

#[derive(Debug, Deserialize)]
struct KernelSpec {
    #[serde(default)]
    language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LanguageInfo {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Cell {
    cell_type: String,
    #[serde(default)]
    source: Source,
}

/// Cell source: nbformat allows a single string or a list of lines
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Source {
    Text(String),
    Lines(Vec<String>),
}

impl Default for Source {
    fn default() -> Self {
        Source::Text(String::new())
    }
}

impl Source {
    fn text(&self) -> String {
        match self {
            Source::Text(s) => s.clone(),
            Source::Lines(lines) => lines.concat(),
        }
    }
}

impl Notebook {
    fn language(&self) -> &str {
        self.metadata
            .language_info
            .as_ref()
            .and_then(|l| l.name.as_deref())
            .or_else(|| {
                self.metadata
                    .kernelspec
                    .as_ref()
                    .and_then(|k| k.language.as_deref())
            })
            .unwrap_or("python")
    }
}

/// Convert raw `.ipynb` JSON into markdown.
pub fn to_markdown(raw: &str) -> Result<String> {
    let notebook: Notebook = serde_json::from_str(raw)
        .map_err(|e| ChatError::InvalidDocument(format!("Invalid notebook: {e}")))?;

    let language = notebook.language();
    let mut blocks = Vec::with_capacity(notebook.cells.len());

    for cell in &notebook.cells {
        let source = cell.source.text();
        let source = source.trim_end();

        match cell.cell_type.as_str() {
            "code" => {
                if source.trim().is_empty() {
                    continue;
                }
                blocks.push(format!("```{language}\n{source}\n```"));
            }
            "markdown" | "raw" => {
                if !source.trim().is_empty() {
                    blocks.push(source.to_string());
                }
            }
            other => tracing::debug!("Skipping notebook cell of type '{}'", other),
        }
    }

    let mut markdown = blocks.join("\n\n");
    markdown.push('\n');
    Ok(markdown)
}
