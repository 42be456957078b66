//! Kira - A file-based work item tracker
//!
//! Kira manages a tree of markdown "work item" files (tasks, PRDs and
//! similar records) under a `.work/` directory. Items carry YAML front
//! matter and live in status-named folders; new items are rendered from
//! templates with typed, validated inputs.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Input, InputType, Schema, ValidationIssue, WorkItem};
pub use storage::{Config, Workspace};
