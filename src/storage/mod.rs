//! Storage layer for Kira
//!
//! Everything that touches the filesystem: configuration loading, `.work/`
//! workspace discovery and initialization, identifier allocation and the
//! lint walk.
//!
//! ```text
//! .work/
//! ├── config.toml           # Statuses, templates, default status
//! ├── templates/
//! │   ├── prd.md            # Template files with input declarations
//! │   └── task.md
//! ├── 1_todo/
//! │   └── 001-fix-login.prd.md
//! ├── 2_in-progress/
//! └── 3_done/
//! ```

mod config;
mod workspace;
mod allocator;
mod lint;

pub use config::{Config, ConfigError};
pub use workspace::{Workspace, WorkspaceError, WORK_DIR};
pub use allocator::{next_id, Allocation, AllocationError};
pub use lint::{lint_all, LintError};
