// In-memory terminal doubles
//
// Drive the pager and navigator without a terminal: `ScriptedKeys`
// replays a fixed key sequence and `MemoryConsole` records every
// screen that was drawn.

// Used by the display and interactive test binaries only
#![allow(dead_code)]

use repochat::display::{Console, Key, KeyError, KeyInput};
use std::collections::VecDeque;
use std::io;

/// Console that records output instead of printing it
#[derive(Debug, Clone, Default)]
pub struct MemoryConsole {
    height: usize,
    /// Lines written since the last clear
    pub screen: Vec<String>,
    /// Every line ever written
    pub transcript: Vec<String>,
    /// Number of `clear` calls
    pub clears: usize,
    /// Number of `flush` calls
    pub flushes: usize,
}

impl MemoryConsole {
    pub fn new(height: usize) -> Self {
        Self {
            height,
            ..Self::default()
        }
    }

    /// Whether any written line contains `needle`
    pub fn printed(&self, needle: &str) -> bool {
        self.transcript.iter().any(|l| l.contains(needle))
    }
}

impl Console for MemoryConsole {
    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        self.screen.clear();
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.screen.push(line.to_string());
        self.transcript.push(line.to_string());
        Ok(())
    }

    fn height(&self) -> usize {
        self.height
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

/// Key input replaying a fixed script
///
/// When the script runs out, reads report `Interrupted`, or an I/O
/// error for input built with `failing`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<Key>,
    available: bool,
    fail_at_end: bool,
    /// Whether raw mode is currently on
    pub raw: bool,
    /// Number of times raw mode was entered
    pub raw_entries: usize,
    /// Number of keys read
    pub reads: usize,
}

impl ScriptedKeys {
    pub fn new<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            available: true,
            ..Self::default()
        }
    }

    /// Input that fails with an I/O error once `keys` are read
    pub fn failing<I: IntoIterator<Item = Key>>(keys: I) -> Self {
        Self {
            fail_at_end: true,
            ..Self::new(keys)
        }
    }

    /// Input whose raw mode can never be entered
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Keys not yet read
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeyInput for ScriptedKeys {
    fn enable_raw(&mut self) -> Result<(), KeyError> {
        if !self.available {
            return Err(KeyError::Unavailable("scripted".to_string()));
        }
        self.raw = true;
        self.raw_entries += 1;
        Ok(())
    }

    fn disable_raw(&mut self) -> Result<(), KeyError> {
        self.raw = false;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Key, KeyError> {
        self.reads += 1;
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None if self.fail_at_end => Err(KeyError::Io(io::Error::other("terminal went away"))),
            None => Err(KeyError::Interrupted),
        }
    }
}
