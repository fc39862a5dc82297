//! One-result-per-screen navigator.
//!
//! Space moves to the next result (or quits after the last one), `q`
//! and Ctrl+C quit, every other key is ignored.

use crate::core::document::Document;
use crate::display::markdown;
use crate::display::results::ResultFields;
use crate::display::terminal::{write_fallback_notice, Console, Key, KeyError, KeyInput, RawMode};
use colored::Colorize;
use std::io;

/// Result of handling one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorAction {
    /// Show the (new) current result
    Redraw,
    /// Nothing changed
    Ignore,
    Quit,
}

/// Navigator state over a ranked result list
#[derive(Debug)]
pub struct Navigator<'a> {
    results: &'a [Document],
    fields: &'a ResultFields,
    current_index: usize,
}

impl<'a> Navigator<'a> {
    pub fn new(results: &'a [Document], fields: &'a ResultFields) -> Self {
        Self {
            results,
            fields,
            current_index: 0,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn is_last(&self) -> bool {
        self.current_index + 1 >= self.results.len()
    }

    pub fn handle_key(&mut self, key: Key) -> NavigatorAction {
        match key {
            Key::Char(' ') if !self.is_last() => {
                self.current_index += 1;
                NavigatorAction::Redraw
            }
            Key::Char(' ') | Key::Char('q') | Key::Char('Q') | Key::Interrupt => {
                NavigatorAction::Quit
            }
            _ => NavigatorAction::Ignore,
        }
    }

    /// Lines for the result at `index`: header, content, footer.
    pub fn screen(&self, index: usize) -> Vec<String> {
        let Some(result) = self.results.get(index) else {
            return Vec::new();
        };

        let header = format!(
            "Result {}/{}: {}",
            index + 1,
            self.results.len(),
            self.fields.title(result)
        );

        let mut lines = vec![header.bold().to_string(), String::new()];
        lines.extend(markdown::render_or_raw(&self.fields.content(result)));
        lines.push(String::new());

        let footer = if index + 1 >= self.results.len() {
            "End of results — press q to quit"
        } else {
            "press space for next, q to quit"
        };
        lines.push(footer.dimmed().to_string());
        lines
    }

    fn draw<C: Console + ?Sized>(&self, console: &mut C) -> io::Result<()> {
        console.clear()?;
        for line in self.screen(self.current_index) {
            console.write_line(&line)?;
        }
        console.flush()
    }

    /// Step through results until the user quits or passes the last one.
    ///
    /// Without raw keyboard input every result is printed in order.
    pub fn run<C, K>(mut self, console: &mut C, input: &mut K) -> io::Result<()>
    where
        C: Console + ?Sized,
        K: KeyInput + ?Sized,
    {
        if self.is_empty() {
            return Ok(());
        }

        let mut raw = match RawMode::enter(input) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Navigator fallback: {}", e);
                return self.dump(console);
            }
        };

        self.draw(console)?;

        loop {
            let key = match raw.read_key() {
                Ok(key) => key,
                Err(KeyError::Interrupted) => break,
                Err(KeyError::Unavailable(reason)) => {
                    tracing::debug!("Navigator fallback: {}", reason);
                    drop(raw);
                    return self.dump(console);
                }
                Err(KeyError::Io(e)) => {
                    drop(raw);
                    if let Err(clear) = console.clear().and_then(|()| console.flush()) {
                        tracing::debug!("Navigator could not clear the screen: {}", clear);
                    }
                    return Err(e);
                }
            };

            match self.handle_key(key) {
                NavigatorAction::Redraw => self.draw(console)?,
                NavigatorAction::Ignore => {}
                NavigatorAction::Quit => break,
            }
        }

        drop(raw);
        console.clear()?;
        console.flush()
    }

    fn dump<C: Console + ?Sized>(&self, console: &mut C) -> io::Result<()> {
        write_fallback_notice(console)?;
        for index in 0..self.results.len() {
            for line in self.screen(index) {
                console.write_line(&line)?;
            }
            console.write_line("")?;
        }
        console.flush()
    }
}
