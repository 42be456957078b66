//! Command-line interface
//!
//! User-facing commands and output formatting:
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Create the `.work/` workspace |
//! | `new` | Create a work item from a template |
//! | `lint` | Validate every work item in the tree |
//!
//! All commands support `--format text|json` and `--verbose`. Call
//! [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod init;
mod new;
mod lint;

pub use app::{run, Cli, Commands};
pub use new::{CreateError, InputSource, NewOptions, StdinSource};
pub use output::{Output, OutputFormat};
