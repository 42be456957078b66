//! Kira - File-based work item tracking for software teams

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = kira::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
