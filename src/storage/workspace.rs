//! Workspace management
//!
//! A workspace is a directory containing `.work/`. Commands discover it by
//! walking up from the current directory, the same way git finds `.git`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::Config;

/// Name of the workspace directory.
pub const WORK_DIR: &str = ".work";

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("Not in a kira workspace. Run 'kira init' first.")]
    NotInWorkspace,
}

const DEFAULT_CONFIG: &str = r#"# Kira configuration

# Status assigned to new work items when none is given
default_status = "todo"

# Status name -> folder (relative to .work/)
[statuses]
todo = "1_todo"
in-progress = "2_in-progress"
done = "3_done"

# Kind name -> template path (relative to .work/)
[templates]
prd = "templates/prd.md"
task = "templates/task.md"
"#;

const PRD_TEMPLATE: &str = r#"<!-- inputs
- name: description
  type: string
  description: One-line summary of the work item
- name: priority
  type: string
  description: Priority level
  options: [low, medium, high]
- name: due
  type: datetime
  description: Target completion date
  format: 2006-01-02
-->
---
id: "{{id}}"
title: {{title}}
status: {{status}}
kind: prd
created: {{created}}
---

# {{title}}

## Context

{{description}}

## Requirements

- [ ]

## Notes

Priority: {{priority}}
Due: {{due}}
"#;

const TASK_TEMPLATE: &str = r#"<!-- inputs
- name: description
  type: string
  description: One-line summary of the task
-->
---
id: "{{id}}"
title: {{title}}
status: {{status}}
kind: task
created: {{created}}
---

# {{title}}

{{description}}
"#;

/// An opened kira workspace: the root directory and its loaded config.
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Opens an existing workspace at the given root.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let work_dir = root.join(WORK_DIR);

        if !work_dir.is_dir() {
            return Err(WorkspaceError::NotInWorkspace.into());
        }

        let config = Config::load(&work_dir)?;

        Ok(Self { root, config })
    }

    /// Opens the workspace at the current directory or an ancestor.
    pub fn open_current() -> Result<Self> {
        let root = Self::find_root().ok_or(WorkspaceError::NotInWorkspace)?;
        Self::open(root)
    }

    /// Initializes a workspace at the given path: the `.work/` directory,
    /// one folder per default status, starter templates and a commented
    /// config file. Idempotent; existing files are left alone.
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let work_dir = root.join(WORK_DIR);

        fs::create_dir_all(&work_dir)
            .with_context(|| format!("Failed to create work directory: {}", work_dir.display()))?;

        let config_path = work_dir.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let config = Config::load(&work_dir)?;

        for folder in config.statuses.values() {
            let path = work_dir.join(folder);
            fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create status folder: {}", path.display()))?;
        }

        let templates_dir = work_dir.join("templates");
        fs::create_dir_all(&templates_dir).with_context(|| {
            format!(
                "Failed to create templates directory: {}",
                templates_dir.display()
            )
        })?;

        for (name, content) in [("prd.md", PRD_TEMPLATE), ("task.md", TASK_TEMPLATE)] {
            let path = templates_dir.join(name);
            if !path.exists() {
                fs::write(&path, content)
                    .with_context(|| format!("Failed to write template: {}", path.display()))?;
            }
        }

        Self::open(root)
    }

    /// Finds the workspace root by looking for `.work/` upward.
    pub fn find_root() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            if current.join(WORK_DIR).is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns the workspace root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the `.work` directory path.
    pub fn work_dir(&self) -> PathBuf {
        self.root.join(WORK_DIR)
    }

    /// Returns the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the absolute path of a status folder.
    pub fn status_dir(&self, folder: &str) -> PathBuf {
        self.work_dir().join(folder)
    }

    /// Returns the absolute path of a kind's template, if configured.
    pub fn template_path(&self, kind: &str) -> Option<PathBuf> {
        self.config
            .template_for(kind)
            .map(|rel| self.work_dir().join(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn init_creates_structure() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::init(dir.path()).unwrap();

        assert!(ws.work_dir().is_dir());
        assert!(ws.work_dir().join("config.toml").is_file());
        assert!(ws.work_dir().join("1_todo").is_dir());
        assert!(ws.work_dir().join("2_in-progress").is_dir());
        assert!(ws.work_dir().join("3_done").is_dir());
        assert!(ws.work_dir().join("templates/prd.md").is_file());
        assert!(ws.work_dir().join("templates/task.md").is_file());
    }

    #[test]
    fn init_is_idempotent() {
        let dir = TempDir::new().unwrap();

        Workspace::init(dir.path()).unwrap();
        Workspace::init(dir.path()).unwrap();

        assert!(dir.path().join(".work").is_dir());
    }

    #[test]
    fn init_preserves_existing_config() {
        let dir = TempDir::new().unwrap();
        Workspace::init(dir.path()).unwrap();

        let config_path = dir.path().join(".work/config.toml");
        fs::write(
            &config_path,
            "default_status = \"done\"\n",
        )
        .unwrap();

        Workspace::init(dir.path()).unwrap();
        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("default_status = \"done\""));
    }

    #[test]
    fn open_non_workspace_fails() {
        let dir = TempDir::new().unwrap();
        assert!(Workspace::open(dir.path()).is_err());
    }

    #[test]
    fn starter_templates_parse() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::init(dir.path()).unwrap();

        let prd = crate::domain::Template::load(&ws.template_path("prd").unwrap()).unwrap();
        assert_eq!(prd.inputs().len(), 3);

        let task = crate::domain::Template::load(&ws.template_path("task").unwrap()).unwrap();
        assert_eq!(task.inputs().len(), 1);
    }

    #[test]
    fn status_dir_paths() {
        let dir = TempDir::new().unwrap();
        let ws = Workspace::init(dir.path()).unwrap();

        assert!(ws.status_dir("1_todo").ends_with(".work/1_todo"));
        assert!(ws.template_path("prd").unwrap().ends_with(".work/templates/prd.md"));
        assert!(ws.template_path("unknown").is_none());
    }
}
