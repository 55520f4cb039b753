//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway config directory and
//! verify outputs. Nothing here talks to a real task store.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_questlog"))
        .args(args)
        .env("QUESTLOG_CONFIG_DIR", config_dir)
        .env_remove("QUESTLOG_STORE_URL")
        .env_remove("QUESTLOG_STORE_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(config_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(config_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

#[test]
fn test_timer_format_clamps_negatives() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_ok(dir.path(), &["timer", "format", "-1", "-5"]).trim(), "00:00");
    assert_eq!(run_ok(dir.path(), &["timer", "format", "7", "3"]).trim(), "07:03");
}

#[test]
fn test_timer_sequence_default() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["timer", "sequence"]);
    assert!(out.contains("0: work x4"));
    assert!(out.contains("2: longBreak x1"));
    assert!(out.contains("expanded: [work] -> work"));
}

#[test]
fn test_timer_sequence_edit_persists() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["timer", "sequence", "add", "longBreak", "2"]);
    assert!(out.contains("SequenceChanged"));
    assert!(out.contains("3: longBreak x2"));

    let out = run_ok(dir.path(), &["timer", "sequence"]);
    assert!(out.contains("3: longBreak x2"));
}

#[test]
fn test_timer_sequence_refuses_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["config", "set", "pomodoro.sequence", r#"[{"mode":"work","count":1}]"#]);
    let (_, stderr, code) = run_cli(dir.path(), &["timer", "sequence", "remove", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("at least one entry"));
}

#[test]
fn test_timer_duration_range() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["timer", "duration", "shortBreak", "45"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("1..=30"));

    run_ok(dir.path(), &["timer", "duration", "work", "50"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "pomodoro.work_duration"]).trim(), "50");
}

#[test]
fn test_theme_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    run_ok(dir.path(), &["theme", "set", "arcade"]);
    assert_eq!(run_ok(dir.path(), &["config", "get", "ui.theme"]).trim(), "Arcade / Retro");

    let out = run_ok(dir.path(), &["theme", "list"]);
    assert!(out.contains("* arcade"));

    let (_, _, code) = run_cli(dir.path(), &["theme", "set", "vaporwave"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "get", "ui.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_config_list_json() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_ok(dir.path(), &["config", "list"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["pomodoro"]["work_duration"], 25);
    assert_eq!(json["store"]["table"], "tasks");
}

#[test]
fn test_task_add_rejects_near_deadline() {
    let dir = tempfile::tempdir().unwrap();
    let soon = (chrono::Utc::now() + chrono::Duration::minutes(5)).to_rfc3339();
    let (_, stderr, code) = run_cli(dir.path(), &["task", "add", "Essay", "--deadline", &soon]);
    assert_ne!(code, 0);
    assert!(stderr.contains("at least 30 minutes"));
}

#[test]
fn test_task_list_requires_store_url() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["task", "list"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("store.url"));
}
