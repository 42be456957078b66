//! Field-level validation rules shared across the crate
//!
//! The registry itself is small: the set of valid statuses and kinds comes
//! from the workspace [`Config`], and the only typed front-matter field is
//! `created` (a calendar date). Template files may declare date formats
//! using Go-style reference layouts (`2006-01-02`), which predate this
//! implementation; [`date_layout_to_chrono`] converts them so existing
//! templates keep working.

use std::collections::BTreeSet;

use crate::storage::Config;

/// Canonical format for the `created` front-matter field.
pub const CREATED_FORMAT: &str = "%Y-%m-%d";

/// The set of valid statuses and kinds for one command invocation.
///
/// Built once from the loaded [`Config`] and passed by reference into the
/// validator; nothing reads configuration through global state.
#[derive(Debug, Clone)]
pub struct Schema {
    statuses: BTreeSet<String>,
    kinds: BTreeSet<String>,
}

impl Schema {
    /// Builds the schema from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            statuses: config.statuses.keys().cloned().collect(),
            kinds: config.templates.keys().cloned().collect(),
        }
    }

    /// Returns true if `status` is a configured status name.
    pub fn is_status(&self, status: &str) -> bool {
        self.statuses.contains(status)
    }

    /// Returns true if `kind` has a configured template.
    pub fn is_kind(&self, kind: &str) -> bool {
        self.kinds.contains(kind)
    }

    /// Comma-separated list of valid statuses, for error messages.
    pub fn status_list(&self) -> String {
        self.statuses.iter().cloned().collect::<Vec<_>>().join(", ")
    }

    /// Comma-separated list of valid kinds, for error messages.
    pub fn kind_list(&self) -> String {
        self.kinds.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Go reference-layout tokens and their chrono equivalents.
///
/// Longer tokens must come before their prefixes (`2006` before `06`,
/// `January` before `Jan`) so the scanner matches greedily.
const LAYOUT_TOKENS: &[(&str, &str)] = &[
    ("2006", "%Y"),
    ("January", "%B"),
    ("Jan", "%b"),
    ("Monday", "%A"),
    ("Mon", "%a"),
    ("15", "%H"),
    ("01", "%m"),
    ("02", "%d"),
    ("03", "%I"),
    ("04", "%M"),
    ("05", "%S"),
    ("06", "%y"),
    ("PM", "%p"),
];

/// Converts a Go reference-date layout (e.g. `2006-01-02`) to a chrono
/// format string (`%Y-%m-%d`).
///
/// Strings that already contain a `%` are assumed to be chrono formats and
/// are returned unchanged.
pub fn date_layout_to_chrono(layout: &str) -> String {
    if layout.contains('%') {
        return layout.to_string();
    }

    let mut out = String::with_capacity(layout.len());
    let mut rest = layout;

    'outer: while let Some(ch) = rest.chars().next() {
        for (token, replacement) in LAYOUT_TOKENS {
            if let Some(tail) = rest.strip_prefix(token) {
                out.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }

        out.push(ch);
        rest = &rest[ch.len_utf8()..];
    }

    out
}
