//! End-to-end tests that spawn the `lineage` binary
//!
//! stdout must stay pure JSON; logs and diagnostics go to stderr.

use std::io::Write;
use std::process::{Command, Output, Stdio};

const FAMILY: &str = r#"{
    "id": "root-1", "name": "A", "gender": "male", "spouse": null,
    "children": [{"id": "c-1", "name": "B"}, {"id": "c-2", "name": "C"}]
}"#;

/// Run the CLI with `input` on stdin
fn run_cli(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_lineage"))
        .args(["--log-level", "off"])
        .args(args)
        .env_remove("LINEAGE_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_layout_from_stdin() {
    let output = run_cli(&["layout", "--input", "-"], FAMILY);
    assert!(output.status.success());

    let report = stdout_json(&output);
    assert_eq!(report["nodes"].as_array().unwrap().len(), 3);
    assert_eq!(report["nodes"][1]["x"], -225.0);
    assert_eq!(report["boundaries"]["minY"], -80.0);
}

#[test]
fn test_layout_hide_flag() {
    let output = run_cli(&["layout", "--hide", "root-1"], FAMILY);
    assert!(output.status.success());

    let report = stdout_json(&output);
    assert_eq!(report["nodes"].as_array().unwrap().len(), 1);
    assert_eq!(report["connections"][0]["type"], "hidden-generation");
    assert_eq!(report["connections"][0]["isHidden"], true);
}

#[test]
fn test_bounds_of_single_person() {
    let output = run_cli(&["bounds"], r#"{"id": "root-1", "name": "A"}"#);
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        serde_json::json!({"minX": -80.0, "minY": -80.0, "width": 410.0, "height": 300.0})
    );
}

#[test]
fn test_bounds_of_empty_document() {
    let output = run_cli(&["bounds"], "null");
    assert!(output.status.success());
    let bounds = stdout_json(&output);
    assert_eq!(bounds["width"], 800.0);
    assert_eq!(bounds["height"], 600.0);
}

#[test]
fn test_validate_reports_stats() {
    let output = run_cli(&["validate"], FAMILY);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("3 persons"));
    assert!(stdout.contains("2 generations"));
}

#[test]
fn test_branch_unknown_id_fails() {
    let output = run_cli(&["branch", "--id", "nobody"], FAMILY);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Person not found: nobody"));
}

#[test]
fn test_malformed_json_fails() {
    let output = run_cli(&["layout"], "{\"id\": ");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse family document"));
}
