//! Less-like pager.
//!
//! Shows a fixed-height window over a list of lines and scrolls it with
//! single keystrokes:
//!
//! | Key                         | Effect                    |
//! |-----------------------------|---------------------------|
//! | `q`, `Q`, Ctrl+C            | quit                      |
//! | space, page-down            | next page                 |
//! | enter, `j`, down            | next line                 |
//! | `k`, up                     | previous line             |
//! | page-up                     | previous page             |
//!
//! The top line never moves past `total - height`, so the last page is
//! always full when there is enough content.

use crate::display::terminal::{write_fallback_notice, Console, Key, KeyError, KeyInput, RawMode};
use colored::Colorize;
use std::io;

/// Rows kept free for the status line
pub const STATUS_ROWS: usize = 3;

/// What the caller should do after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    Continue,
    Quit,
}

/// Pager state
#[derive(Debug, Clone)]
pub struct Pager {
    lines: Vec<String>,
    current_line: usize,
    terminal_height: usize,
    last_rendered: Option<(usize, usize)>,
}

impl Pager {
    /// Create a pager showing `terminal_height` lines per page (at least 1).
    pub fn new(lines: Vec<String>, terminal_height: usize) -> Self {
        Self {
            lines,
            current_line: 0,
            terminal_height: terminal_height.max(1),
            last_rendered: None,
        }
    }

    /// Create a pager sized for `console`, leaving room for the status line.
    pub fn for_console<C: Console + ?Sized>(lines: Vec<String>, console: &C) -> Self {
        Self::new(lines, console.height().saturating_sub(STATUS_ROWS))
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn terminal_height(&self) -> usize {
        self.terminal_height
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// One past the last visible line
    pub fn end_line(&self) -> usize {
        (self.current_line + self.terminal_height).min(self.lines.len())
    }

    /// Highest possible top line
    fn bottom(&self) -> usize {
        self.lines.len().saturating_sub(self.terminal_height)
    }

    pub fn status_line(&self) -> String {
        let total = self.lines.len();
        let end = self.end_line();
        let percentage = if total == 0 { 100 } else { end * 100 / total };
        format!(
            ":{percentage}% ({end}/{total}) Press 'q'/Ctrl+C to quit, ↑↓/j/k to scroll, Space for next page"
        )
    }

    /// Apply one keystroke to the scroll position.
    pub fn handle_key(&mut self, key: Key) -> PagerAction {
        match key {
            Key::Char('q') | Key::Char('Q') | Key::Interrupt => return PagerAction::Quit,
            Key::Char(' ') | Key::PageDown => {
                self.current_line = (self.current_line + self.terminal_height).min(self.bottom());
            }
            Key::Enter | Key::Char('j') | Key::Down => {
                if self.current_line < self.bottom() {
                    self.current_line += 1;
                }
            }
            Key::Char('k') | Key::Up => {
                self.current_line = self.current_line.saturating_sub(1);
            }
            Key::PageUp => {
                self.current_line = self.current_line.saturating_sub(self.terminal_height);
            }
            _ => {}
        }
        PagerAction::Continue
    }

    /// Draw the current page unless it is already on screen.
    ///
    /// Returns whether anything was written.
    pub fn render<C: Console + ?Sized>(&mut self, console: &mut C, force: bool) -> io::Result<bool> {
        let end = self.end_line();
        let view = (self.current_line, end);
        if !force && self.last_rendered == Some(view) {
            return Ok(false);
        }

        console.clear()?;
        for line in &self.lines[self.current_line..end] {
            console.write_line(line)?;
        }
        console.write_line("")?;
        console.write_line(&self.status_line().dimmed().to_string())?;
        console.flush()?;

        self.last_rendered = Some(view);
        Ok(true)
    }

    /// Page interactively until the user quits.
    ///
    /// Without raw keyboard input every line is printed once instead.
    pub fn run<C, K>(mut self, console: &mut C, input: &mut K) -> io::Result<()>
    where
        C: Console + ?Sized,
        K: KeyInput + ?Sized,
    {
        let mut raw = match RawMode::enter(input) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Pager fallback: {}", e);
                return self.dump(console);
            }
        };

        self.render(console, true)?;

        loop {
            let key = match raw.read_key() {
                Ok(key) => key,
                Err(KeyError::Interrupted) => break,
                Err(KeyError::Unavailable(reason)) => {
                    tracing::debug!("Pager fallback: {}", reason);
                    drop(raw);
                    return self.dump(console);
                }
                Err(KeyError::Io(e)) => {
                    drop(raw);
                    if let Err(clear) = console.clear().and_then(|()| console.flush()) {
                        tracing::debug!("Pager could not clear the screen: {}", clear);
                    }
                    return Err(e);
                }
            };

            let before = self.current_line;
            if self.handle_key(key) == PagerAction::Quit {
                break;
            }
            if self.current_line != before {
                self.render(console, false)?;
            }
        }

        drop(raw);
        console.clear()?;
        console.flush()
    }

    fn dump<C: Console + ?Sized>(&self, console: &mut C) -> io::Result<()> {
        write_fallback_notice(console)?;
        for line in &self.lines {
            console.write_line(line)?;
        }
        console.flush()
    }
}
