//! Search result presentation.

use crate::core::config::DisplayMode;
use crate::core::document::{field_text, Document, CONTENT_FIELD, FILENAME_FIELD};
use crate::display::navigator::Navigator;
use crate::display::pager::Pager;
use crate::display::terminal::{Console, KeyInput};
use colored::Colorize;
use std::io;

/// Width of the rule between results
pub const RULE_WIDTH: usize = 80;

/// Which document fields hold the result body and title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultFields {
    pub content_field: String,
    pub title_field: String,
}

impl Default for ResultFields {
    fn default() -> Self {
        Self {
            content_field: CONTENT_FIELD.to_string(),
            title_field: FILENAME_FIELD.to_string(),
        }
    }
}

impl ResultFields {
    pub fn new(content_field: impl Into<String>, title_field: impl Into<String>) -> Self {
        Self {
            content_field: content_field.into(),
            title_field: title_field.into(),
        }
    }

    pub fn title(&self, doc: &Document) -> String {
        field_text(doc, &self.title_field).unwrap_or_else(|| "Unknown".to_string())
    }

    pub fn content(&self, doc: &Document) -> String {
        field_text(doc, &self.content_field).unwrap_or_else(|| "No content available".to_string())
    }
}

/// Build the pager buffer for a result list.
pub fn result_lines(results: &[Document], query: &str, fields: &ResultFields) -> Vec<String> {
    let mut lines = vec![
        format!("Found {} results for: {}", results.len(), query),
        String::new(),
    ];

    for (i, result) in results.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, fields.title(result)));
        lines.push(String::new());
        lines.extend(fields.content(result).split('\n').map(str::to_string));
        lines.push(String::new());
        lines.push("─".repeat(RULE_WIDTH));
        lines.push(String::new());
    }

    lines
}

fn no_results<C: Console + ?Sized>(console: &mut C) -> io::Result<()> {
    console.write_line(&"No results found!".red().bold().to_string())?;
    console.flush()
}

/// Show all results in one scrollable pager.
pub fn display_results_with_navigation<C, K>(
    results: &[Document],
    query: &str,
    fields: &ResultFields,
    console: &mut C,
    input: &mut K,
) -> io::Result<()>
where
    C: Console + ?Sized,
    K: KeyInput + ?Sized,
{
    if results.is_empty() {
        return no_results(console);
    }

    let pager = Pager::for_console(result_lines(results, query, fields), console);
    pager.run(console, input)
}

/// Show results one per screen.
pub fn display_results_one_by_one<C, K>(
    results: &[Document],
    fields: &ResultFields,
    console: &mut C,
    input: &mut K,
) -> io::Result<()>
where
    C: Console + ?Sized,
    K: KeyInput + ?Sized,
{
    if results.is_empty() {
        return no_results(console);
    }

    Navigator::new(results, fields).run(console, input)
}

/// Show results with the configured display mode.
pub fn display_results<C, K>(
    mode: DisplayMode,
    results: &[Document],
    query: &str,
    fields: &ResultFields,
    console: &mut C,
    input: &mut K,
) -> io::Result<()>
where
    C: Console + ?Sized,
    K: KeyInput + ?Sized,
{
    match mode {
        DisplayMode::Pager => display_results_with_navigation(results, query, fields, console, input),
        DisplayMode::Navigator => display_results_one_by_one(results, fields, console, input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::document;
    use serde_json::{json, Value};

    #[test]
    fn test_result_lines_layout() {
        let results = vec![
            document([("filename", json!("a.md")), ("content", json!("one\ntwo"))]),
            document([("filename", json!("b.md")), ("content", json!("three"))]),
        ];

        let lines = result_lines(&results, "docker", &ResultFields::default());
        let rule = "─".repeat(80);

        assert_eq!(
            lines,
            vec![
                "Found 2 results for: docker", "",
                "1. a.md", "", "one", "two", "", rule.as_str(), "",
                "2. b.md", "", "three", "", rule.as_str(), "",
            ]
        );
    }

    #[test]
    fn test_custom_fields_and_defaults() {
        let fields = ResultFields::new("body", "url");
        let results = vec![
            document([("url", json!("https://x/1")), ("body", json!("Streaming"))]),
            document([("body", Value::Null)]),
        ];

        let lines = result_lines(&results, "q", &fields);
        assert!(lines.contains(&"1. https://x/1".to_string()));
        assert!(lines.contains(&"Streaming".to_string()));
        assert!(lines.contains(&"2. Unknown".to_string()));
        assert!(lines.contains(&"No content available".to_string()));
    }
}
