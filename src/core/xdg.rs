//! XDG Base Directory Support
//!
//! Resolves config and cache locations following the XDG Base
//! Directory layout, with `REPOCHAT_*` overrides.

use std::env;
use std::fs;
use std::path::PathBuf;

/// XDG directory structure for repochat
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub cache_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit REPOCHAT_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.cache)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve("REPOCHAT_CONFIG_DIR", "XDG_CONFIG_HOME", &[".config"]),
            cache_dir: Self::resolve("REPOCHAT_CACHE_DIR", "XDG_CACHE_HOME", &[".cache"]),
        }
    }

    fn resolve(own_var: &str, xdg_var: &str, default_parts: &[&str]) -> PathBuf {
        if let Ok(dir) = env::var(own_var) {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var(xdg_var) {
            return PathBuf::from(xdg).join("repochat");
        }

        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        for part in default_parts {
            path = path.join(part);
        }
        path.join("repochat")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        // REPOCHAT_CONFIG_FILE is an explicit override
        if let Ok(file) = env::var("REPOCHAT_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Default location of the LLM output cache
    pub fn llm_cache_file(&self) -> PathBuf {
        self.cache_dir.join("llm_cache.json")
    }

    /// Create all XDG directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(&self.cache_dir)?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  Cache: {:?}", self.cache_dir);
        tracing::debug!("  Config file: {:?}", self.config_file());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
