//! Lint pass over the item tree
//!
//! Walks every configured status folder, validates every item file and
//! aggregates all failures into one report. One bad file never blocks
//! reporting on the rest: unreadable files become an issue on that path
//! and the walk continues.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::Config;
use crate::domain::{is_item_file, validate, Schema, ValidationIssue, WorkItem};

/// Aggregate lint failure: every offending path with its issues.
///
/// The message contains the literal text `validation failed`; scripts grep
/// for it, so it is part of the CLI contract.
#[derive(Debug)]
pub struct LintError {
    pub failures: Vec<(PathBuf, Vec<ValidationIssue>)>,
}

impl fmt::Display for LintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "validation failed: {} work item(s) have issues",
            self.failures.len()
        )?;

        for (path, issues) in &self.failures {
            writeln!(f, "  {}:", path.display())?;
            for issue in issues {
                writeln!(f, "    - {}", issue)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for LintError {}

/// Validates every item in the tree. Returns the number of items checked
/// when all of them are clean; an empty tree lints clean.
pub fn lint_all(work_dir: &Path, config: &Config) -> Result<usize, LintError> {
    let schema = Schema::from_config(config);
    let mut failures = Vec::new();
    let mut checked = 0;

    for folder in config.statuses.values() {
        let dir = work_dir.join(folder);
        if !dir.is_dir() {
            continue;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                failures.push((dir.clone(), vec![ValidationIssue::Unreadable(e.to_string())]));
                continue;
            }
        };

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    failures.push((dir.clone(), vec![ValidationIssue::Unreadable(e.to_string())]));
                    continue;
                }
            };

            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if !is_item_file(name) {
                continue;
            }

            checked += 1;

            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    failures.push((path, vec![ValidationIssue::Unreadable(e.to_string())]));
                    continue;
                }
            };

            let mut issues = validate(&content, &schema);

            if let Some(issue) = folder_mismatch(&content, folder, config) {
                issues.push(issue);
            }

            if !issues.is_empty() {
                failures.push((path, issues));
            }
        }
    }

    if failures.is_empty() {
        Ok(checked)
    } else {
        Err(LintError { failures })
    }
}

/// Flags items whose front-matter status disagrees with the folder they
/// physically live in. Only fires for statuses the validator already
/// accepted, so an unknown status yields one issue, not two.
fn folder_mismatch(content: &str, folder: &str, config: &Config) -> Option<ValidationIssue> {
    let item = WorkItem::parse(content).ok()?;
    let status = item.front.status?;
    let status_folder = config.folder_for(&status)?;

    if status_folder != folder {
        let expected = config.status_for_folder(folder)?;
        Some(ValidationIssue::StatusFolderMismatch {
            status,
            folder: folder.to_string(),
            expected: expected.to_string(),
        })
    } else {
        None
    }
}
