//! Work item parsing
//!
//! A work item is a markdown file with YAML front matter delimited by `---`
//! lines. Front matter is parsed into a schema-aware structure: the known
//! fields (`id`, `title`, `status`, `kind`, `created`) are typed, while any
//! extra fields are retained in an open mapping for forward compatibility.
//!
//! Item files follow the naming convention `<id>-<kebab-title>.<kind>.md`,
//! e.g. `001-fix-login.prd.md`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("missing front matter (file must start with ---)")]
    MissingFrontMatter,

    #[error("unterminated front matter (missing closing ---)")]
    Unterminated,

    #[error("malformed front matter: {0}")]
    Malformed(String),
}

/// Front matter of a work item.
///
/// All known fields are optional at parse time; the validator decides which
/// absences are defects. Values are normalized to strings so that YAML
/// scalars like `created: 2024-01-01` and `id: 001` round-trip predictably.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frontmatter {
    #[serde(default, deserialize_with = "de_scalar")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "de_scalar")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "de_scalar")]
    pub status: Option<String>,

    #[serde(default, deserialize_with = "de_scalar")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "de_scalar")]
    pub created: Option<String>,

    /// Extra fields are permitted and ignored by validation.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Deserializes any YAML scalar into an owned string.
///
/// Leading-zero scalars like `001` already arrive as strings, but bare
/// integers and booleans come through as typed scalars; accepting any
/// scalar keeps hand-edited files from failing with a type error where
/// the validator could report something more useful.
fn de_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(scalar_to_string))
}

fn scalar_to_string(value: serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One parsed work item: front matter plus markdown body.
#[derive(Debug, Clone)]
pub struct WorkItem {
    pub front: Frontmatter,
    pub body: String,
}

impl WorkItem {
    /// Parses raw file content into front matter and body.
    pub fn parse(content: &str) -> Result<Self, ParseError> {
        let content = content.trim_start();

        if !content.starts_with("---") {
            return Err(ParseError::MissingFrontMatter);
        }

        let rest = &content[3..];
        let end = rest.find("\n---").ok_or(ParseError::Unterminated)?;

        let yaml = rest[..end].trim();
        let body = rest[end + 4..].trim_start_matches('-').trim();

        let front: Frontmatter =
            serde_yaml::from_str(yaml).map_err(|e| ParseError::Malformed(e.to_string()))?;

        Ok(Self {
            front,
            body: body.to_string(),
        })
    }
}

/// Converts a title to the kebab-cased form used in item file names.
pub fn kebab_case(s: &str) -> String {
    s.to_lowercase().replace([' ', '_'], "-")
}

/// Returns the leading id portion of an item-shaped file name, or `None`
/// when the name does not follow `<id>-<slug>.md`.
///
/// The prefix is not guaranteed to be numeric; callers decide how to treat
/// names like `abc-note.md`.
pub fn id_prefix(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(".md")?;
    let (prefix, _) = stem.split_once('-')?;
    Some(prefix)
}

/// Returns true if the file name follows the item naming convention, with a
/// numeric identifier before the first hyphen.
pub fn is_item_file(file_name: &str) -> bool {
    id_prefix(file_name)
        .is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
