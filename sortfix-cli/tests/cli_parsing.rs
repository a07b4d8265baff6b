//! CLI argument parsing edge case tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sortfix() -> Command {
    Command::cargo_bin("sortfix").expect("sortfix binary")
}

fn dump_json(path: &str, names: &[(&str, u64, u64)]) -> String {
    let members: Vec<serde_json::Value> = names
        .iter()
        .map(|(name, start, end)| {
            serde_json::json!({
                "name": name,
                "size": end - start,
                "span": { "start": start, "end": end }
            })
        })
        .collect();

    serde_json::json!({
        "schema": "sortfix.dump.v1",
        "tool": { "name": "ts-extract", "version": "0.4.0" },
        "source": { "path": path, "text": "{ b; a }" },
        "declarations": [{ "id": "T@0", "kind": "object_type", "members": members }]
    })
    .to_string()
}

fn create_temp_workspace() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    let root = td.path();

    fs::create_dir_all(root.join("artifacts").join("ts-extract")).unwrap();
    fs::write(
        root.join("artifacts").join("ts-extract").join("members.json"),
        dump_json("src/config.ts", &[("b", 2, 3), ("a", 5, 6)]),
    )
    .unwrap();

    td
}

#[test]
fn check_defaults_to_current_dir_and_flags_violations() {
    let temp = create_temp_workspace();

    sortfix()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .code(1);

    assert!(temp
        .path()
        .join("artifacts/sortfix/report.json")
        .exists());
}

#[test]
fn check_empty_artifacts_dir_passes() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(temp.path().join("artifacts")).unwrap();

    sortfix()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success();
}

#[test]
fn fix_without_apply_is_a_dry_run() {
    let temp = create_temp_workspace();

    sortfix()
        .current_dir(temp.path())
        .arg("fix")
        .assert()
        .success();

    // Artifacts written, no source file required or touched.
    assert!(temp.path().join("artifacts/sortfix/patch.diff").exists());
    assert!(temp.path().join("artifacts/sortfix/fixes.md").exists());
    assert!(!temp.path().join("src/config.ts").exists());
}

#[test]
fn order_flags_parse() {
    let temp = create_temp_workspace();

    sortfix()
        .current_dir(temp.path())
        .args([
            "check",
            "--policy",
            "line-length",
            "--direction",
            "desc",
            "--ignore-case",
        ])
        .assert()
        .code(predicate::in_iter([0, 1]));
}

#[test]
fn unknown_policy_value_is_a_usage_error() {
    let temp = create_temp_workspace();

    sortfix()
        .current_dir(temp.path())
        .args(["check", "--policy", "random"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--policy"));
}

#[test]
fn explain_known_policy_succeeds() {
    sortfix()
        .arg("explain")
        .arg("natural")
        .assert()
        .success()
        .stdout(predicate::str::contains("item2"));
}

#[test]
fn explain_unknown_policy_fails_with_known_list() {
    sortfix()
        .arg("explain")
        .arg("sorted")
        .assert()
        .code(2);
}

#[test]
fn list_policies_text_and_json() {
    sortfix()
        .args(["list-policies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alphabetical"))
        .stdout(predicate::str::contains("line-length"));

    sortfix()
        .args(["list-policies", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"key\""));
}

#[test]
fn explicit_dump_flag_skips_directory_scanning() {
    let temp = create_temp_workspace();
    let dump_path = temp
        .path()
        .join("artifacts")
        .join("ts-extract")
        .join("members.json");

    sortfix()
        .current_dir(temp.path())
        .args(["check", "--dump", dump_path.to_str().expect("utf8 path")])
        .assert()
        .code(1);
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    sortfix().assert().failure().code(2);
}
