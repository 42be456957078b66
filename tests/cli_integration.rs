//! CLI integration tests for Kira
//!
//! These tests verify the complete workflow from initialization through
//! item creation and linting, ensuring commands work together correctly.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the kira binary
fn kira_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("kira"))
}

/// Create a temporary directory and initialize a kira workspace
fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    kira_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    kira_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized kira workspace"));

    assert!(dir.path().join(".work").is_dir());
    assert!(dir.path().join(".work/config.toml").is_file());
    assert!(dir.path().join(".work/1_todo").is_dir());
    assert!(dir.path().join(".work/2_in-progress").is_dir());
    assert!(dir.path().join(".work/3_done").is_dir());
    assert!(dir.path().join(".work/templates/prd.md").is_file());
    assert!(dir.path().join(".work/templates/task.md").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    kira_cmd().arg("init").arg(dir.path()).assert().success();
    kira_cmd().arg("init").arg(dir.path()).assert().success();
}

// =============================================================================
// Item Creation Tests
// =============================================================================

#[test]
fn test_new_creates_item_with_first_id() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "Test Feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created work item 001"));

    let path = dir.path().join(".work/1_todo/001-test-feature.prd.md");
    assert!(path.is_file());

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("---\n"));
    assert!(content.contains("title: Test Feature"));
    assert!(content.contains("status: todo"));
    assert!(content.contains("kind: prd"));
}

#[test]
fn test_new_assigns_sequential_ids() {
    let dir = setup_workspace();

    for title in ["First", "Second", "Third"] {
        kira_cmd()
            .current_dir(dir.path())
            .args(["new", "task", title])
            .assert()
            .success();
    }

    let todo = dir.path().join(".work/1_todo");
    assert!(todo.join("001-first.task.md").is_file());
    assert!(todo.join("002-second.task.md").is_file());
    assert!(todo.join("003-third.task.md").is_file());
}

#[test]
fn test_new_status_title_either_order() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "in-progress", "Fix bug"])
        .assert()
        .success();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "Fix other bug", "in-progress"])
        .assert()
        .success();

    let in_progress = dir.path().join(".work/2_in-progress");
    assert!(in_progress.join("001-fix-bug.prd.md").is_file());
    assert!(in_progress.join("002-fix-other-bug.prd.md").is_file());
}

#[test]
fn test_new_rejects_ambiguous_arguments() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "Not a status", "Also not one"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ambiguous arguments"))
        .stderr(predicate::str::contains("Not a status"))
        .stderr(predicate::str::contains("Also not one"));
}

#[test]
fn test_new_requires_title_without_interactive() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title is required"));
}

#[test]
fn test_new_with_direct_inputs() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args([
            "new",
            "prd",
            "Planned work",
            "-i",
            "due=2025-10-01",
            "-i",
            "priority=high",
        ])
        .assert()
        .success();

    let content =
        fs::read_to_string(dir.path().join(".work/1_todo/001-planned-work.prd.md")).unwrap();
    assert!(content.contains("Due: 2025-10-01"));
    assert!(content.contains("Priority: high"));
}

#[test]
fn test_new_rejects_invalid_input_value() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "Bad date", "-i", "due=13/40/9999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_help_inputs_lists_template_inputs() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "--help-inputs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("description"))
        .stdout(predicate::str::contains("priority"))
        .stdout(predicate::str::contains("Options: low, medium, high"));
}

#[test]
fn test_new_outside_workspace_fails() {
    let dir = TempDir::new().unwrap();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a kira workspace"));
}

// =============================================================================
// Lint Tests
// =============================================================================

#[test]
fn test_lint_clean_tree_succeeds() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "Valid item"])
        .assert()
        .success();

    kira_cmd()
        .current_dir(dir.path())
        .arg("lint")
        .assert()
        .success()
        .stdout(predicate::str::contains("no issues found"));
}

#[test]
fn test_lint_empty_tree_succeeds() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .arg("lint")
        .assert()
        .success();
}

#[test]
fn test_lint_reports_invalid_status() {
    let dir = setup_workspace();

    let item = "---\n\
id: \"001\"\n\
title: Test Feature\n\
status: invalid-status\n\
kind: prd\n\
created: 2024-01-01\n\
---\n\n\
# Test Feature\n";
    fs::write(
        dir.path().join(".work/1_todo/001-test-feature.prd.md"),
        item,
    )
    .unwrap();

    kira_cmd()
        .current_dir(dir.path())
        .arg("lint")
        .assert()
        .failure()
        .stderr(predicate::str::contains("validation failed"))
        .stderr(predicate::str::contains("001-test-feature.prd.md"))
        .stderr(predicate::str::contains("invalid-status"));
}

#[test]
fn test_lint_lists_every_offending_item() {
    let dir = setup_workspace();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "Good one"])
        .assert()
        .success();

    let bad = "---\n\
id: \"002\"\n\
status: bogus\n\
kind: prd\n\
created: not-a-date\n\
---\nbody\n";
    fs::write(dir.path().join(".work/3_done/002-bad.prd.md"), bad).unwrap();

    kira_cmd()
        .current_dir(dir.path())
        .arg("lint")
        .assert()
        .failure()
        .stderr(predicate::str::contains("002-bad.prd.md"))
        .stderr(predicate::str::contains("missing or empty field 'title'"))
        .stderr(predicate::str::contains("invalid created date"))
        .stderr(predicate::str::contains("001-good-one").not());
}

#[test]
fn test_lint_flags_status_folder_mismatch() {
    let dir = setup_workspace();

    let item = "---\n\
id: \"001\"\n\
title: Moved item\n\
status: done\n\
kind: prd\n\
created: 2024-01-01\n\
---\nbody\n";
    fs::write(dir.path().join(".work/1_todo/001-moved-item.prd.md"), item).unwrap();

    kira_cmd()
        .current_dir(dir.path())
        .arg("lint")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not match folder"));
}

// =============================================================================
// Output Format Tests
// =============================================================================

#[test]
fn test_json_output_for_new() {
    let dir = setup_workspace();

    let assert = kira_cmd()
        .current_dir(dir.path())
        .args(["new", "prd", "Json item", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(value["id"], "001");
    assert_eq!(value["status"], "todo");
    assert_eq!(value["kind"], "prd");
}

#[test]
fn test_json_output_for_lint() {
    let dir = setup_workspace();

    let assert = kira_cmd()
        .current_dir(dir.path())
        .args(["lint", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(value["checked"], 0);
    assert_eq!(value["issues"], 0);
}

// =============================================================================
// Custom Configuration Tests
// =============================================================================

#[test]
fn test_custom_statuses_from_config() {
    let dir = setup_workspace();

    fs::write(
        dir.path().join(".work/config.toml"),
        r#"default_status = "backlog"

[statuses]
backlog = "0_backlog"
review = "4_review"

[templates]
prd = "templates/prd.md"
task = "templates/task.md"
"#,
    )
    .unwrap();

    kira_cmd()
        .current_dir(dir.path())
        .args(["new", "task", "review", "Custom flow"])
        .assert()
        .success();

    assert!(dir
        .path()
        .join(".work/4_review/001-custom-flow.task.md")
        .is_file());
}
