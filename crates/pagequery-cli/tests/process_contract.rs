use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::tempdir;

fn cli_bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pagequery"))
}

fn write_snapshot(dir: &Path) -> PathBuf {
    let snapshot = json!({
        "now": "2024-05-15T12:00:00Z",
        "pages": [
            {"id": "start", "title": "Welcome", "modified": "2024-05-01T00:00:00Z", "references": ["wiki:syntax"]},
            {"id": "wiki:syntax", "title": "Formatting Syntax", "modified": "2024-05-10T00:00:00Z", "media": ["wiki:logo.png"]},
            {"id": "wiki:syntax:tables", "title": "Tables", "modified": "2024-05-14T12:00:00Z", "references": ["wiki:syntax"]},
            {"id": "private:notes", "title": "Syntax Notes", "readable": false, "references": ["wiki:syntax"]},
            {"id": "playground:syntax", "title": "Sandbox", "references": ["wiki:syntax"]}
        ]
    });
    let path = dir.join("pages.json");
    fs::write(&path, snapshot.to_string()).expect("write snapshot");
    path
}

fn run(snapshot: &Path, args: &[&str]) -> Output {
    Command::new(cli_bin_path())
        .arg("--snapshot")
        .arg(snapshot)
        .args(args)
        .env_remove("PAGEQUERY_TITLE_MATCH")
        .env_remove("PAGEQUERY_TITLE_SEARCH")
        .env_remove("PAGEQUERY_DATE_EXPRESSIONS")
        .env("PAGEQUERY_HIDDEN_PAGES", "playground:*")
        .env("PAGEQUERY_LOG", "off")
        .output()
        .expect("run pagequery")
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout json")
}

#[test]
fn lookup_process_contract_prints_ranked_hits() {
    let root = tempdir().expect("tempdir");
    let snapshot = write_snapshot(root.path());

    let value = stdout_json(&run(&snapshot, &["lookup", "syntax"]));
    assert_eq!(
        value,
        json!([
            {"id": "wiki:syntax", "title": "Formatting Syntax"},
            {"id": "wiki:syntax:tables", "title": "Tables"}
        ])
    );
}

#[test]
fn lookup_process_contract_applies_time_bounds() {
    let root = tempdir().expect("tempdir");
    let snapshot = write_snapshot(root.path());

    let value = stdout_json(&run(
        &snapshot,
        &["lookup", "syntax", "--after", "3 days ago", "--no-title"],
    ));
    assert_eq!(value, json!([{"id": "wiki:syntax:tables", "title": "Tables"}]));
}

#[test]
fn backlinks_process_contract_respects_permissions_flag() {
    let root = tempdir().expect("tempdir");
    let snapshot = write_snapshot(root.path());

    let value = stdout_json(&run(&snapshot, &["backlinks", "wiki:syntax"]));
    assert_eq!(value, json!(["start", "wiki:syntax:tables"]));

    let value = stdout_json(&run(
        &snapshot,
        &["backlinks", "wiki:syntax", "--ignore-permissions"],
    ));
    assert_eq!(
        value,
        json!(["playground:syntax", "private:notes", "start", "wiki:syntax:tables"])
    );
}

#[test]
fn media_use_process_contract_lists_users() {
    let root = tempdir().expect("tempdir");
    let snapshot = write_snapshot(root.path());

    let value = stdout_json(&run(&snapshot, &["media-use", "wiki:logo.png"]));
    assert_eq!(value, json!(["wiki:syntax"]));
}

#[test]
fn missing_snapshot_reports_error_payload() {
    let root = tempdir().expect("tempdir");
    let output = run(&root.path().join("missing.json"), &["lookup", "syntax"]);

    assert!(!output.status.success());
    let payload: Value = serde_json::from_slice(&output.stderr).expect("stderr payload json");
    assert_eq!(payload["code"], "IO_ERROR");
    assert_eq!(payload["operation"], "page_lookup");
    assert!(payload["trace_id"].is_string());
}

#[test]
fn invalid_title_match_mode_is_rejected() {
    let root = tempdir().expect("tempdir");
    let snapshot = write_snapshot(root.path());
    let output = Command::new(cli_bin_path())
        .arg("--snapshot")
        .arg(&snapshot)
        .args(["lookup", "syntax"])
        .env("PAGEQUERY_TITLE_MATCH", "fuzzy")
        .env("PAGEQUERY_LOG", "off")
        .output()
        .expect("run pagequery");

    assert!(!output.status.success());
    let payload: Value = serde_json::from_slice(&output.stderr).expect("stderr payload json");
    assert_eq!(payload["code"], "VALIDATION_FAILED");
}
