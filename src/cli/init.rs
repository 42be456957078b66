//! `kira init` - create the workspace structure

use anyhow::Result;

use super::output::Output;
use crate::storage::Workspace;

pub fn run(path: &str, output: &Output) -> Result<()> {
    let ws = Workspace::init(path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "root": ws.root().display().to_string(),
            "work_dir": ws.work_dir().display().to_string(),
        }));
    } else {
        output.success(&format!(
            "Initialized kira workspace at {}",
            ws.root().display()
        ));
    }

    Ok(())
}
