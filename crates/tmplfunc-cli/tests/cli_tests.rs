//! End-to-end tests for the `tmplfunc` binary
//!
//! Tests cover:
//! - `tmplfunc apply` for every operation
//! - Validation errors and exit codes
//! - Input from files, untyped loading, JSON output
//! - Configuration from tmplfunc.toml and TMPLFUNC_* variables
//! - `tmplfunc list`

use insta::assert_snapshot;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

fn tmplfunc() -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("tmplfunc");
    cmd.env_remove("TMPLFUNC_OUTPUT")
        .env_remove("TMPLFUNC_LOG")
        .env_remove("TMPLFUNC_UNTYPED");
    cmd
}

/// Create a temporary directory with a test file
fn create_test_file(filename: &str, content: &str) -> (TempDir, String) {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    (temp_dir, file_path.to_str().unwrap().to_string())
}

// ============================================================================
// tmplfunc apply - Success Cases
// ============================================================================

#[test]
fn test_apply_map_inc() {
    tmplfunc()
        .args(["apply", "map", "inc", "1", "2", "3", "4"])
        .assert()
        .success()
        .stdout("[2, 3, 4, 5]\n");
}

#[test]
fn test_apply_filter_odd() {
    tmplfunc()
        .args(["apply", "filter", "odd", "1", "2", "3", "4"])
        .assert()
        .success()
        .stdout("[1, 3]\n");
}

#[test]
fn test_apply_find_not_found() {
    tmplfunc()
        .args(["apply", "find", "false", "1", "2"])
        .assert()
        .success()
        .stdout("null\n");

    tmplfunc()
        .args(["apply", "findIndex", "false", "1", "2"])
        .assert()
        .success()
        .stdout("-1\n");
}

#[test]
fn test_apply_negative_values() {
    tmplfunc()
        .args(["apply", "find", "odd", "-3", "-1", "5"])
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn test_apply_json_output() {
    tmplfunc()
        .args(["apply", "map", "odd", "1", "2", "--json"])
        .assert()
        .success()
        .stdout("[true,false]\n");
}

#[test]
fn test_apply_data_file() {
    let (_dir, path) = create_test_file("in.json", "[5, 6, 7]");

    tmplfunc()
        .args(["apply", "filter", "odd", "--data", &path])
        .assert()
        .success()
        .stdout("[5, 7]\n");
}

#[test]
fn test_apply_null_data_is_empty() {
    let (_dir, path) = create_test_file("in.json", "null");

    tmplfunc()
        .args(["apply", "map", "inc", "--data", &path])
        .assert()
        .success()
        .stdout("[]\n");
}

// ============================================================================
// tmplfunc apply - Error Cases
// ============================================================================

#[test]
fn test_apply_not_a_slice() {
    let (_dir, path) = create_test_file("in.json", "123");

    tmplfunc()
        .args(["apply", "map", "inc", "--data", &path])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "expected first parameter to be an array, not int",
        ));
}

#[test]
fn test_apply_predicate_requires_bool() {
    tmplfunc()
        .args(["apply", "filter", "inc", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "expected first return type to be assignable to bool",
        ));
}

#[test]
fn test_apply_untyped_reports_item() {
    tmplfunc()
        .args(["apply", "map", "inc", "1", "x", "--untyped"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item 1 not assignable to int: found string"));
}

#[test]
fn test_apply_unknown_function() {
    tmplfunc()
        .args(["apply", "map", "dec", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown function 'dec'"));
}

#[test]
fn test_apply_unknown_operation() {
    tmplfunc()
        .args(["apply", "reduce", "inc", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown operation 'reduce'"));
}

#[test]
fn test_apply_missing_data_file() {
    tmplfunc()
        .args(["apply", "map", "inc", "--data", "nonexistent.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read data file"));
}

#[test]
fn test_apply_values_conflict_with_data() {
    let (_dir, path) = create_test_file("in.json", "[1]");

    tmplfunc()
        .args(["apply", "map", "inc", "1", "--data", &path])
        .assert()
        .failure();
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_file_sets_output() {
    let (dir, _path) = create_test_file("tmplfunc.toml", "output = \"json\"\n");

    tmplfunc()
        .current_dir(dir.path())
        .args(["apply", "map", "inc", "1"])
        .assert()
        .success()
        .stdout("[2]\n");
}

#[test]
fn test_env_overrides_config_file() {
    let (dir, _path) = create_test_file("tmplfunc.toml", "output = \"json\"\n");

    tmplfunc()
        .current_dir(dir.path())
        .env("TMPLFUNC_OUTPUT", "text")
        .args(["apply", "map", "odd", "1"])
        .assert()
        .success()
        .stdout("[true]\n");
}

#[test]
fn test_env_untyped() {
    tmplfunc()
        .env("TMPLFUNC_UNTYPED", "1")
        .args(["apply", "map", "inc", "1", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("item 1"));
}

#[test]
fn test_invalid_config_file() {
    let (_dir, path) = create_test_file("custom.toml", "colour = \"red\"\n");

    tmplfunc()
        .args(["--config", &path, "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_debug_logging_goes_to_stderr() {
    tmplfunc()
        .args(["--log", "debug", "apply", "map", "inc", "1"])
        .assert()
        .success()
        .stdout("[2]\n")
        .stderr(predicate::str::contains("applying"));
}

// ============================================================================
// tmplfunc list
// ============================================================================

#[test]
fn test_list_text() {
    let output = tmplfunc().arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_snapshot!(stdout.trim_end(), @r"
    false      fn() -> bool
    filter     fn(any, any) -> (any, error)
    find       fn(any, any) -> (any, error)
    findIndex  fn(any, any) -> (int, error)
    inc        fn(int) -> int
    map        fn(any, any) -> (any, error)
    odd        fn(int) -> bool
    ");
}

#[test]
fn test_list_json() {
    let output = tmplfunc().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 7);
    assert_eq!(entries[0]["name"], "false");
    assert_eq!(entries[0]["signature"], "fn() -> bool");
    assert_eq!(entries[0]["params"], serde_json::json!([]));
    assert_eq!(entries[0]["results"], serde_json::json!(["bool"]));
}
