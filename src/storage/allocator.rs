//! Work item identifier allocation
//!
//! Identifiers are zero-padded decimals, unique across the whole item
//! tree. Allocation scans every configured status folder, parses the
//! leading id portion of each item file name and returns max + 1.
//!
//! The id is not reserved: the caller must write the new item promptly.
//! Two concurrent invocations can race on the scan-then-write window and
//! produce duplicate ids; there is no cross-process locking.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::Config;
use crate::domain::id_prefix;

/// Minimum identifier width. Existing wider ids raise the width.
const MIN_WIDTH: usize = 3;

#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("cannot read item tree at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of an allocation: the next id plus any item-shaped files whose
/// id portion could not be parsed (skipped, reported as warnings).
#[derive(Debug)]
pub struct Allocation {
    pub id: String,
    pub skipped: Vec<PathBuf>,
}

/// Computes the next unique identifier for the item tree.
///
/// Returns `001` for an empty tree. Missing status folders are treated as
/// empty; a stray unparsable file name is skipped rather than aborting, so
/// allocation stays available even when one file is malformed.
pub fn next_id(work_dir: &Path, config: &Config) -> Result<Allocation, AllocationError> {
    let mut max: u64 = 0;
    let mut width = MIN_WIDTH;
    let mut skipped = Vec::new();

    for folder in config.statuses.values() {
        let dir = work_dir.join(folder);
        if !dir.is_dir() {
            continue;
        }

        let entries = fs::read_dir(&dir).map_err(|source| AllocationError::Unreadable {
            path: dir.clone(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| AllocationError::Unreadable {
                path: dir.clone(),
                source,
            })?;

            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                skipped.push(entry.path());
                continue;
            };

            let Some(prefix) = id_prefix(name) else {
                // Not item-shaped (no id-hyphen prefix or not .md); ignore
                continue;
            };

            match prefix.parse::<u64>() {
                Ok(n) => {
                    max = max.max(n);
                    width = width.max(prefix.len());
                }
                Err(_) => skipped.push(entry.path()),
            }
        }
    }

    Ok(Allocation {
        id: format!("{:0width$}", max + 1, width = width),
        skipped,
    })
}
