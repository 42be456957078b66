//! `kira lint` - validate every work item in the tree

use anyhow::Result;

use super::output::Output;
use crate::storage::{lint_all, Workspace};

pub fn run(output: &Output) -> Result<()> {
    let ws = Workspace::open_current()?;
    output.verbose_ctx("lint", &format!("Walking {}", ws.work_dir().display()));

    let checked = lint_all(&ws.work_dir(), ws.config())?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "checked": checked,
            "issues": 0,
        }));
    } else {
        output.success(&format!(
            "{} work item(s) checked, no issues found",
            checked
        ));
    }

    Ok(())
}
