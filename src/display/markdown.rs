//! Terminal markdown rendering.
//!
//! Line-based styling for the subset search results actually contain:
//! ATX headings, fenced code, block quotes, bullet and numbered lists,
//! rules, and inline `code`, **bold** and *italic* spans.

use colored::Colorize;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

static INLINE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"`([^`]+)`|\*\*([^*]+)\*\*|\*([^*\s][^*]*)\*").ok()
});

static ORDERED_ITEM: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^(\d+)[.)]\s+(.*)$").ok());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarkdownError {
    #[error("code fence opened on line {0} is never closed")]
    UnterminatedFence(usize),
}

/// Render markdown into styled terminal lines.
pub fn render(text: &str) -> Result<Vec<String>, MarkdownError> {
    let mut out = Vec::new();
    let mut fence: Option<(usize, String)> = None;

    for (number, line) in text.lines().enumerate() {
        let trimmed = line.trim_start();

        if let Some((_, marker)) = &fence {
            if trimmed.trim_end() == marker.as_str() {
                fence = None;
                out.push(String::new());
            } else {
                out.push(format!("    {}", line.yellow()));
            }
            continue;
        }

        if let Some(marker) = fence_marker(trimmed) {
            let language = trimmed[marker.len()..].trim();
            fence = Some((number + 1, marker));
            out.push(if language.is_empty() {
                String::new()
            } else {
                format!("  {}", language.dimmed())
            });
            continue;
        }

        out.push(render_block_line(trimmed, line));
    }

    match fence {
        Some((line, _)) => Err(MarkdownError::UnterminatedFence(line)),
        None => Ok(out),
    }
}

/// Render markdown, falling back to the raw text on failure.
pub fn render_or_raw(text: &str) -> Vec<String> {
    match render(text) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::debug!("Showing raw content: {}", e);
            text.lines().map(str::to_string).collect()
        }
    }
}

fn fence_marker(trimmed: &str) -> Option<String> {
    for ch in ['`', '~'] {
        let run = trimmed.chars().take_while(|c| *c == ch).count();
        if run >= 3 {
            return Some(ch.to_string().repeat(run));
        }
    }
    None
}

fn render_block_line(trimmed: &str, line: &str) -> String {
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some((level, title)) = heading(trimmed) {
        let title = inline(title);
        return if level == 1 {
            title.bold().underline().to_string()
        } else {
            title.bold().to_string()
        };
    }

    if is_rule(trimmed) {
        return "─".repeat(40).dimmed().to_string();
    }

    if let Some(quote) = trimmed.strip_prefix('>') {
        return format!("{} {}", "│".dimmed(), inline(quote.trim_start()).italic());
    }

    let indent = &line[..line.len() - trimmed.len()];

    for bullet in ["- ", "* ", "+ "] {
        if let Some(item) = trimmed.strip_prefix(bullet) {
            return format!("{indent}  • {}", inline(item));
        }
    }

    if let Some(caps) = ORDERED_ITEM.as_ref().and_then(|re| re.captures(trimmed)) {
        return format!("{indent}  {}. {}", &caps[1], inline(&caps[2]));
    }

    format!("{indent}{}", inline(trimmed))
}

fn heading(trimmed: &str) -> Option<(usize, &str)> {
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &trimmed[level..];
    if rest.is_empty() {
        return Some((level, ""));
    }
    rest.strip_prefix(' ').map(|title| (level, title.trim()))
}

fn is_rule(trimmed: &str) -> bool {
    let compact: String = trimmed.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|ch| compact.chars().all(|c| c == *ch))
}

fn inline(text: &str) -> String {
    let Some(re) = INLINE.as_ref() else {
        return text.to_string();
    };

    re.replace_all(text, |caps: &Captures| {
        if let Some(code) = caps.get(1) {
            code.as_str().cyan().to_string()
        } else if let Some(bold) = caps.get(2) {
            bold.as_str().bold().to_string()
        } else if let Some(italic) = caps.get(3) {
            italic.as_str().italic().to_string()
        } else {
            caps[0].to_string()
        }
    })
    .into_owned()
}
