//! Terminal capabilities.
//!
//! Output and keyboard input are separate traits so the pager and
//! navigator can run against a real terminal, a pipe, or an in-memory
//! double:
//!
//! - [`Console`]: clear, write a line, report height, flush
//! - [`KeyInput`]: enter/leave raw mode, read one key
//!
//! Raw mode is only ever entered through [`RawMode`], whose `Drop`
//! restores the terminal on every exit path.

use colored::Colorize;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, execute, terminal};
use std::io::{self, IsTerminal, Stdout, Write};
use thiserror::Error;

/// Rows assumed when the terminal cannot report its size
pub const DEFAULT_HEIGHT: usize = 24;

/// A single keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Up,
    Down,
    PageUp,
    PageDown,
    /// Ctrl+C
    Interrupt,
    Other,
}

/// Why a key could not be read
#[derive(Debug, Error)]
pub enum KeyError {
    /// Raw single-key input is not possible here (pipe, refused, ...)
    #[error("raw keyboard input unavailable: {0}")]
    Unavailable(String),

    /// The user interrupted the read
    #[error("interrupted")]
    Interrupted,

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Raw single-keystroke input
pub trait KeyInput {
    /// Switch the terminal to raw mode.
    fn enable_raw(&mut self) -> Result<(), KeyError>;

    /// Restore the terminal's original input mode.
    fn disable_raw(&mut self) -> Result<(), KeyError>;

    /// Block until one key is pressed.
    fn read_key(&mut self) -> Result<Key, KeyError>;
}

/// Line-oriented screen output
pub trait Console {
    fn clear(&mut self) -> io::Result<()>;
    fn write_line(&mut self, line: &str) -> io::Result<()>;
    /// Screen height in lines
    fn height(&self) -> usize;
    fn flush(&mut self) -> io::Result<()>;
}

/// Scoped raw mode; dropping it restores the input mode.
pub struct RawMode<'a, K: KeyInput + ?Sized> {
    input: &'a mut K,
}

impl<'a, K: KeyInput + ?Sized> RawMode<'a, K> {
    pub fn enter(input: &'a mut K) -> Result<Self, KeyError> {
        input.enable_raw()?;
        Ok(Self { input })
    }

    pub fn read_key(&mut self) -> Result<Key, KeyError> {
        self.input.read_key()
    }
}

impl<K: KeyInput + ?Sized> Drop for RawMode<'_, K> {
    fn drop(&mut self) {
        if let Err(e) = self.input.disable_raw() {
            tracing::warn!("Failed to restore terminal mode: {}", e);
        }
    }
}

/// Print the one-time warning shown when paging is not possible.
pub fn write_fallback_notice<C: Console + ?Sized>(console: &mut C) -> io::Result<()> {
    console.write_line(
        &"⚠️  Arrow key navigation not available on this system."
            .yellow()
            .to_string(),
    )?;
    console.write_line("Showing all content at once:")?;
    console.write_line("")
}

/// Console on stdout
pub struct StdoutConsole {
    out: Stdout,
    interactive: bool,
}

impl StdoutConsole {
    pub fn new() -> Self {
        let out = io::stdout();
        let interactive = out.is_terminal();
        Self { out, interactive }
    }
}

impl Default for StdoutConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdoutConsole {
    fn clear(&mut self) -> io::Result<()> {
        // Escape sequences would only pollute a pipe
        if !self.interactive {
            return Ok(());
        }
        execute!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        // Raw mode disables the implicit carriage return
        write!(self.out, "{line}\r\n")
    }

    fn height(&self) -> usize {
        terminal::size()
            .map(|(_, rows)| rows as usize)
            .unwrap_or(DEFAULT_HEIGHT)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Keyboard input through crossterm
#[derive(Debug, Default)]
pub struct CrosstermKeys {
    raw: bool,
}

impl KeyInput for CrosstermKeys {
    fn enable_raw(&mut self) -> Result<(), KeyError> {
        terminal::enable_raw_mode().map_err(|e| KeyError::Unavailable(e.to_string()))?;
        self.raw = true;
        Ok(())
    }

    fn disable_raw(&mut self) -> Result<(), KeyError> {
        if self.raw {
            terminal::disable_raw_mode()?;
            self.raw = false;
        }
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key, KeyError> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    return Ok(translate(key));
                }
                _ => continue,
            }
        }
    }
}

fn translate(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        _ => Key::Other,
    }
}

/// Key input for hosts without a keyboard terminal
#[derive(Debug, Clone)]
pub struct UnavailableKeys {
    reason: String,
}

impl UnavailableKeys {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl KeyInput for UnavailableKeys {
    fn enable_raw(&mut self) -> Result<(), KeyError> {
        Err(KeyError::Unavailable(self.reason.clone()))
    }

    fn disable_raw(&mut self) -> Result<(), KeyError> {
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key, KeyError> {
        Err(KeyError::Unavailable(self.reason.clone()))
    }
}

/// Pick the key input for this process.
///
/// Raw keys need both stdin and stdout attached to a terminal.
pub fn detect_key_input() -> Box<dyn KeyInput> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        Box::new(CrosstermKeys::default())
    } else {
        tracing::debug!("stdin/stdout is not a terminal, paging disabled");
        Box::new(UnavailableKeys::new("not a terminal"))
    }
}
