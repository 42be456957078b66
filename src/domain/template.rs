//! Work item templates
//!
//! A template is a markdown file that may open with an input declaration
//! block, an HTML comment holding a YAML list:
//!
//! ```text
//! <!-- inputs
//! - name: priority
//!   type: string
//!   description: Priority level
//!   options: [low, medium, high]
//! - name: due
//!   type: datetime
//!   description: Target completion date
//!   format: 2006-01-02
//! -->
//! ```
//!
//! The remainder of the file is the body; `{{name}}` placeholders are
//! substituted at render time. The declaration block is stripped from
//! rendered output. Rendering is pure: the same template and value map
//! always produce identical output.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use thiserror::Error;

use super::schema::{date_layout_to_chrono, CREATED_FORMAT};

const INPUTS_OPEN: &str = "<!-- inputs";
const INPUTS_CLOSE: &str = "-->";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("cannot read template {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unterminated input block in {path} (missing '-->')")]
    UnterminatedInputs { path: PathBuf },

    #[error("malformed input declarations in {path}: {reason}")]
    MalformedInputs { path: PathBuf, reason: String },

    #[error("invalid value '{value}' for input '{name}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

/// Declared type of a template input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    #[default]
    String,
    Number,
    Datetime,
}

impl InputType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputType::String => "string",
            InputType::Number => "number",
            InputType::Datetime => "datetime",
        }
    }
}

/// One input variable declared by a template.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Input {
    /// Placeholder name, unique within the template.
    pub name: String,

    #[serde(rename = "type", default)]
    pub input_type: InputType,

    /// Human-readable description shown in prompts and `--help-inputs`.
    #[serde(default)]
    pub description: String,

    /// Allowed values; only meaningful for `string` inputs.
    #[serde(default)]
    pub options: Vec<String>,

    /// Date format; only meaningful for `datetime` inputs. Accepts Go
    /// reference layouts (`2006-01-02`) or chrono format strings.
    #[serde(default)]
    pub format: Option<String>,
}

impl Input {
    /// Checks a supplied value against this input's declared type.
    pub fn check(&self, value: &str) -> Result<(), TemplateError> {
        match self.input_type {
            InputType::String => {
                if !self.options.is_empty() && !self.options.iter().any(|o| o == value) {
                    return Err(TemplateError::InvalidValue {
                        name: self.name.clone(),
                        value: value.to_string(),
                        reason: format!("must be one of: {}", self.options.join(", ")),
                    });
                }
                Ok(())
            }
            InputType::Number => value.trim().parse::<i64>().map(|_| ()).map_err(|_| {
                TemplateError::InvalidValue {
                    name: self.name.clone(),
                    value: value.to_string(),
                    reason: "must be an integer".to_string(),
                }
            }),
            InputType::Datetime => {
                let layout = self.format.as_deref().unwrap_or(CREATED_FORMAT);
                let fmt = date_layout_to_chrono(layout);

                let ok = NaiveDateTime::parse_from_str(value, &fmt).is_ok()
                    || NaiveDate::parse_from_str(value, &fmt).is_ok();

                if ok {
                    Ok(())
                } else {
                    Err(TemplateError::InvalidValue {
                        name: self.name.clone(),
                        value: value.to_string(),
                        reason: format!("must match format {}", layout),
                    })
                }
            }
        }
    }
}

/// A loaded template: declared inputs plus the body to render.
#[derive(Debug, Clone)]
pub struct Template {
    path: PathBuf,
    inputs: Vec<Input>,
    body: String,
}

impl Template {
    /// Loads and parses a template file.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parses template content; `path` is used in error messages only.
    pub fn parse(content: &str, path: &Path) -> Result<Self, TemplateError> {
        let trimmed = content.trim_start();

        if !trimmed.starts_with(INPUTS_OPEN) {
            return Ok(Self {
                path: path.to_path_buf(),
                inputs: Vec::new(),
                body: content.to_string(),
            });
        }

        let rest = &trimmed[INPUTS_OPEN.len()..];
        let end = rest
            .find(INPUTS_CLOSE)
            .ok_or_else(|| TemplateError::UnterminatedInputs {
                path: path.to_path_buf(),
            })?;

        let yaml = rest[..end].trim();
        let inputs: Vec<Input> = if yaml.is_empty() {
            Vec::new()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| TemplateError::MalformedInputs {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
        };

        let body = &rest[end + INPUTS_CLOSE.len()..];
        let body = body.strip_prefix('\n').unwrap_or(body);

        Ok(Self {
            path: path.to_path_buf(),
            inputs,
            body: body.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Declared inputs, in file order.
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// Renders the template body with the supplied values.
    ///
    /// Every `{{name}}` matching a supplied key is substituted with its
    /// value; declared inputs with no supplied value render as the empty
    /// string. Tokens that are neither supplied nor declared are left
    /// untouched.
    pub fn render(&self, values: &BTreeMap<String, String>) -> String {
        let mut out = self.body.clone();

        for (name, value) in values {
            out = out.replace(&placeholder(name), value);
        }

        for input in &self.inputs {
            if !values.contains_key(&input.name) {
                out = out.replace(&placeholder(&input.name), "");
            }
        }

        out
    }
}

fn placeholder(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}
