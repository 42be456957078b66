//! Domain models for Kira
//!
//! Contains the core business logic without any I/O concerns.

mod schema;
mod item;
mod template;
mod validate;

pub use schema::{date_layout_to_chrono, Schema, CREATED_FORMAT};
pub use item::{id_prefix, is_item_file, kebab_case, Frontmatter, ParseError, WorkItem};
pub use template::{Input, InputType, Template, TemplateError};
pub use validate::{validate, ValidationIssue};
