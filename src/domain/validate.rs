//! Work item validation
//!
//! Checks one item's front matter against the schema and returns every
//! defect found. Issues are collected, never thrown: a single pass surfaces
//! the complete list so one run reports everything wrong with an item.

use chrono::NaiveDate;
use thiserror::Error;

use super::item::{ParseError, WorkItem};
use super::schema::{Schema, CREATED_FORMAT};

/// One field-level defect in a work item. Non-fatal; collected by the
/// validator and aggregated by the linter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("missing front matter (file must start with ---)")]
    MissingFrontMatter,

    #[error("malformed front matter: {0}")]
    MalformedFrontMatter(String),

    #[error("missing or empty field '{0}'")]
    MissingField(&'static str),

    #[error("invalid status '{status}' (valid: {valid})")]
    InvalidStatus { status: String, valid: String },

    #[error("unknown kind '{kind}' (valid: {valid})")]
    UnknownKind { kind: String, valid: String },

    #[error("invalid created date '{value}' (expected format {format})")]
    InvalidCreated { value: String, format: String },

    #[error("status '{status}' does not match folder '{folder}' (folder holds '{expected}' items)")]
    StatusFolderMismatch {
        status: String,
        folder: String,
        expected: String,
    },

    #[error("unreadable file: {0}")]
    Unreadable(String),
}

/// Validates raw item content, returning every issue found.
///
/// An empty vec means the item is fully valid. Unknown extra front-matter
/// fields are permitted and ignored.
pub fn validate(content: &str, schema: &Schema) -> Vec<ValidationIssue> {
    let item = match WorkItem::parse(content) {
        Ok(item) => item,
        Err(ParseError::MissingFrontMatter) => return vec![ValidationIssue::MissingFrontMatter],
        Err(e) => return vec![ValidationIssue::MalformedFrontMatter(e.to_string())],
    };

    let mut issues = Vec::new();
    let front = &item.front;

    if front.id.as_deref().is_none_or(str::is_empty) {
        issues.push(ValidationIssue::MissingField("id"));
    }

    if front.title.as_deref().is_none_or(str::is_empty) {
        issues.push(ValidationIssue::MissingField("title"));
    }

    match front.status.as_deref() {
        None | Some("") => issues.push(ValidationIssue::MissingField("status")),
        Some(status) if !schema.is_status(status) => {
            issues.push(ValidationIssue::InvalidStatus {
                status: status.to_string(),
                valid: schema.status_list(),
            });
        }
        Some(_) => {}
    }

    match front.kind.as_deref() {
        None | Some("") => issues.push(ValidationIssue::MissingField("kind")),
        Some(kind) if !schema.is_kind(kind) => {
            issues.push(ValidationIssue::UnknownKind {
                kind: kind.to_string(),
                valid: schema.kind_list(),
            });
        }
        Some(_) => {}
    }

    match front.created.as_deref() {
        None | Some("") => issues.push(ValidationIssue::MissingField("created")),
        Some(created) => {
            if NaiveDate::parse_from_str(created, CREATED_FORMAT).is_err() {
                issues.push(ValidationIssue::InvalidCreated {
                    value: created.to_string(),
                    format: CREATED_FORMAT.to_string(),
                });
            }
        }
    }

    issues
}
