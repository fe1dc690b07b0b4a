//! User configuration
//!
//! Loaded from `<config_dir>/excel2sql/config.toml` when present; every
//! field has a default so the tool works with no config file at all.
//! Command-line flags override whatever is loaded here.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Base URL the task identifier is appended to in script headers
const DEFAULT_TASK_LINK_BASE: &str = "https://app.clickup.com/t/36671967/";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Destination directory for generated scripts
    pub output_dir: PathBuf,
    /// Base URL the task identifier is appended to
    pub task_link_base: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")),
            task_link_base: DEFAULT_TASK_LINK_BASE.to_string(),
        }
    }
}

impl Config {
    /// Load the config file, falling back to defaults when it doesn't exist
    ///
    /// A config file that exists but fails to parse is an error, not a
    /// silent fallback.
    pub fn load() -> Result<Self> {
        let Some(path) = config_path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("excel2sql").join("config.toml"))
}
