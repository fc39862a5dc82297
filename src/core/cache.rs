//! Processed-content cache.
//!
//! LLM output for a file is expensive, so it is kept across runs in a
//! JSON file keyed by repository path. Every `set` is written through
//! to disk (temp file + rename) so an interrupted run keeps what it
//! already paid for.

use crate::core::error::{ChatError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A cached value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub value: String,
    pub stored_at: DateTime<Utc>,
}

/// Key/value cache for processed file content
#[derive(Debug)]
pub struct ContentCache {
    path: Option<PathBuf>,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl ContentCache {
    /// Open (or start) a cache backed by `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&contents).map_err(|e| {
                    ChatError::CacheError(format!("Corrupt cache file {}: {e}", path.display()))
                })?
            }
        } else {
            HashMap::new()
        };

        tracing::debug!("Opened cache {} ({} entries)", path.display(), entries.len());

        Ok(Self {
            path: Some(path),
            entries: Mutex::new(entries),
        })
    }

    /// A cache that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().map(|e| e.contains_key(key)).unwrap_or(false)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock()
            .ok()
            .and_then(|e| e.get(key).map(|entry| entry.value.clone()))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store `value` under `key` and persist the cache.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let mut entries = self.lock()?;
        entries.insert(
            key.into(),
            CacheEntry {
                value: value.into(),
                stored_at: Utc::now(),
            },
        );

        if let Some(path) = &self.path {
            persist(path, &entries)?;
        }
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, CacheEntry>>> {
        self.entries
            .lock()
            .map_err(|_| ChatError::CacheError("Cache lock poisoned".to_string()))
    }
}

fn persist(path: &Path, entries: &HashMap<String, CacheEntry>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(entries)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
