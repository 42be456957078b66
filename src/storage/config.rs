//! Configuration handling for Kira
//!
//! Configuration lives in `.work/config.toml`. A missing file means the
//! built-in defaults; a present file replaces them wholesale. The loaded
//! [`Config`] is immutable for the duration of one command invocation and
//! is passed by reference into every component that needs it.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Workspace configuration: status folders, templates and the default
/// status for new items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Status assigned to new items when none is given.
    pub default_status: String,

    /// Status name to folder, relative to `.work/`.
    pub statuses: BTreeMap<String, String>,

    /// Kind name to template path, relative to `.work/`.
    pub templates: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_status: "todo".to_string(),
            statuses: BTreeMap::from([
                ("todo".to_string(), "1_todo".to_string()),
                ("in-progress".to_string(), "2_in-progress".to_string()),
                ("done".to_string(), "3_done".to_string()),
            ]),
            templates: BTreeMap::from([
                ("prd".to_string(), "templates/prd.md".to_string()),
                ("task".to_string(), "templates/task.md".to_string()),
            ]),
        }
    }
}

impl Config {
    /// Loads configuration from `config.toml` in the given work directory,
    /// falling back to defaults when the file does not exist.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join("config.toml");

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse config")?;

        config.check()?;
        Ok(config)
    }

    /// Rejects configurations that every command would trip over.
    fn check(&self) -> Result<(), ConfigError> {
        if self.statuses.is_empty() {
            return Err(ConfigError::Invalid("no statuses configured".to_string()));
        }

        if !self.statuses.contains_key(&self.default_status) {
            return Err(ConfigError::Invalid(format!(
                "default_status '{}' is not a configured status",
                self.default_status
            )));
        }

        Ok(())
    }

    /// Returns the folder for a status, or `None` for unknown statuses.
    pub fn folder_for(&self, status: &str) -> Option<&str> {
        self.statuses
            .get(status)
            .map(String::as_str)
            .filter(|f| !f.is_empty())
    }

    /// Returns the status whose folder matches `folder`, if any.
    pub fn status_for_folder(&self, folder: &str) -> Option<&str> {
        self.statuses
            .iter()
            .find(|(_, f)| f.as_str() == folder)
            .map(|(s, _)| s.as_str())
    }

    /// Returns the template path for a kind, relative to the work dir.
    pub fn template_for(&self, kind: &str) -> Option<PathBuf> {
        self.templates.get(kind).map(PathBuf::from)
    }

    /// Valid status names, sorted, for error messages and prompts.
    pub fn status_names(&self) -> Vec<&str> {
        self.statuses.keys().map(String::as_str).collect()
    }

    /// Configured kind names, sorted.
    pub fn kind_names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}
