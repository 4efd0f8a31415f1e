//! CLI tests for the non-interactive commands.
//!
//! Spawns the binary against a temporary root and checks exit codes and
//! output.

use std::fs;
use std::process::{Command, Output};

use build_switcher::exit_codes;
use build_switcher::test_support::TestRoot;

fn run(root: &TestRoot, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_build-switcher"))
        .args(args)
        .arg("--root")
        .arg(root.path())
        .arg("--pointer-file")
        .arg(root.pointer_path())
        .env("RUST_LOG", "off")
        .output()
        .expect("run build-switcher")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn list_marks_current_build() {
    let root = TestRoot::new().expect("root");
    root.build_with_layout("KodiBuild1").expect("build");
    root.plain_dir("xbmc-old").expect("dir");
    root.plain_dir("randomfolder").expect("dir");
    root.write_pointer(&format!(
        "xbmc.data={}\n",
        root.path().join("xbmc-old").display()
    ))
    .expect("pointer");

    let output = run(&root, &["list"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "KodiBuild1\n[CURRENT] xbmc-old\n");
}

#[test]
fn list_json_emits_build_records() {
    let root = TestRoot::new().expect("root");
    root.build_with_layout("KodiBuild1").expect("build");

    let output = run(&root, &["list", "--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value[0]["name"], "KodiBuild1");
    assert_eq!(value[0]["is_current"], false);
}

#[test]
fn list_empty_root_exits_not_found() {
    let root = TestRoot::new().expect("root");
    let output = run(&root, &["list"]);
    assert_eq!(output.status.code(), Some(exit_codes::NOT_FOUND));
}

#[test]
fn list_json_empty_root_prints_empty_array_and_exits_not_found() {
    let root = TestRoot::new().expect("root");
    let output = run(&root, &["list", "--json"]);
    assert_eq!(output.status.code(), Some(exit_codes::NOT_FOUND));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("json");
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn set_then_current_round_trips() {
    let root = TestRoot::new().expect("root");
    root.build_with_layout("BuildA").expect("build");

    let output = run(&root, &["set", "BuildA"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));

    let output = run(&root, &["current"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        stdout(&output).trim(),
        root.path().join("BuildA").display().to_string()
    );
}

#[test]
fn current_without_pointer_exits_not_found() {
    let root = TestRoot::new().expect("root");
    let output = run(&root, &["current"]);
    assert_eq!(output.status.code(), Some(exit_codes::NOT_FOUND));
}

#[test]
fn create_sanitizes_and_rejects_duplicates() {
    let root = TestRoot::new().expect("root");

    let output = run(&root, &["create", "My Build/Test"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(root.path().join("My Build_Test/.kodi").is_dir());

    let output = run(&root, &["create", "My Build/Test"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("already exists"));
    assert_eq!(
        fs::read_dir(root.path().join("My Build_Test"))
            .expect("read")
            .count(),
        1
    );
}

#[test]
fn switch_cancelled_on_empty_input_exits_cancelled() {
    let root = TestRoot::new().expect("root");
    root.build_with_layout("KodiBuild1").expect("build");

    let output = run(&root, &["switch"]);
    assert_eq!(output.status.code(), Some(exit_codes::CANCELLED));
    assert!(!root.pointer_path().exists());
}
