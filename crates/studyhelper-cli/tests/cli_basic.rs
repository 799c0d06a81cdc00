//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studyhelper"))
        .env("STUDYHELPER_HOME", home)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(home: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "CLI command failed: {args:?}\n{stderr}");
    stdout
}

fn added_id(stdout: &str) -> String {
    stdout
        .trim()
        .strip_prefix("Lesson added: ")
        .expect("unexpected add output")
        .to_string()
}

// 2026-10-19 is a Monday.
const MONDAY: &str = "2026-10-19";

#[test]
fn test_lesson_add_and_show_template() {
    let home = TempDir::new().unwrap();
    let out = run_ok(
        home.path(),
        &["lesson", "add", "--weekday", "mon", "Math", "08:30", "09:15", "--room", "204"],
    );
    assert!(out.starts_with("Lesson added: "));

    let out = run_ok(home.path(), &["day", "show", "--weekday", "monday"]);
    assert!(out.contains("08:30-09:15 Math (204)"), "{out}");
    assert!(out.contains("#E57373"));
}

#[test]
fn test_date_inherits_template_until_edited() {
    let home = TempDir::new().unwrap();
    let id = added_id(&run_ok(
        home.path(),
        &["lesson", "add", "--weekday", "mon", "Math", "08:30", "09:15"],
    ));

    let out = run_ok(home.path(), &["day", "modified", "--date", MONDAY]);
    assert_eq!(out.trim(), "false");

    run_ok(home.path(), &["homework", "set", "--date", MONDAY, &id, "p. 12"]);
    let out = run_ok(home.path(), &["day", "show", "--date", MONDAY]);
    assert!(out.contains("hw: p. 12"), "{out}");

    // Homework alone is not a content change.
    let out = run_ok(home.path(), &["day", "modified", "--date", MONDAY]);
    assert_eq!(out.trim(), "false");

    run_ok(home.path(), &["lesson", "delete", "--date", MONDAY, &id]);
    let out = run_ok(home.path(), &["day", "modified", "--date", MONDAY]);
    assert_eq!(out.trim(), "true");

    run_ok(home.path(), &["day", "reset", "--date", MONDAY]);
    let out = run_ok(home.path(), &["day", "modified", "--date", MONDAY]);
    assert_eq!(out.trim(), "false");
}

#[test]
fn test_day_show_json() {
    let home = TempDir::new().unwrap();
    run_ok(
        home.path(),
        &["lesson", "add", "--weekday", "mon", "Physics", "09:25", "10:10"],
    );
    run_ok(
        home.path(),
        &["lesson", "add", "--weekday", "mon", "Math", "08:30", "09:15"],
    );

    let out = run_ok(home.path(), &["day", "show", "--date", MONDAY, "--json"]);
    let lessons: serde_json::Value = serde_json::from_str(&out).unwrap();
    let titles: Vec<_> = lessons
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, ["Math", "Physics"]);
}

#[test]
fn test_holiday_toggle_clears_template_day() {
    let home = TempDir::new().unwrap();
    run_ok(
        home.path(),
        &["lesson", "add", "--weekday", "sat", "Biology", "10:00", "10:45"],
    );

    let out = run_ok(home.path(), &["holiday", "toggle", "--weekday", "sat"]);
    assert!(out.contains("holiday"));
    let out = run_ok(home.path(), &["holiday", "toggle", "--weekday", "sat"]);
    assert!(out.contains("regular day"));

    let out = run_ok(home.path(), &["day", "show", "--weekday", "sat"]);
    assert!(out.contains("no lessons"), "{out}");
}

#[test]
fn test_week_show_lists_seven_days() {
    let home = TempDir::new().unwrap();
    run_ok(home.path(), &["holiday", "toggle", "--date", "2026-10-21"]);
    let out = run_ok(home.path(), &["week", "show", "--date", "2026-10-22"]);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 7);
    assert!(lines[0].starts_with("2026-10-19 MONDAY"));
    assert!(lines[2].contains("holiday"));
    assert!(lines[2].contains("[modified]"));
    assert!(lines[6].starts_with("2026-10-25 SUNDAY"));
}

#[test]
fn test_export_import_round_trip() {
    let home = TempDir::new().unwrap();
    run_ok(
        home.path(),
        &["lesson", "add", "--weekday", "tue", "History", "11:00", "11:45"],
    );
    let file = home.path().join("backup.json");
    run_ok(home.path(), &["export", file.to_str().unwrap()]);

    let other = TempDir::new().unwrap();
    run_ok(other.path(), &["import", file.to_str().unwrap()]);
    let out = run_ok(other.path(), &["day", "show", "--weekday", "tue"]);
    assert!(out.contains("History"));
}

#[test]
fn test_import_rejects_malformed_file() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("bad.json");
    std::fs::write(&file, "{ not json").unwrap();

    let (_, stderr, code) = run_cli(home.path(), &["import", file.to_str().unwrap()]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_lesson_scope_is_required() {
    let home = TempDir::new().unwrap();
    let (_, _, code) = run_cli(home.path(), &["lesson", "add", "Math", "08:30", "09:15"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_set_and_get() {
    let home = TempDir::new().unwrap();
    assert_eq!(
        run_ok(home.path(), &["config", "get", "monitor.tick_interval_ms"]).trim(),
        "1000"
    );
    run_ok(home.path(), &["config", "set", "notifications.alerts", "false"]);
    assert_eq!(
        run_ok(home.path(), &["config", "get", "notifications.alerts"]).trim(),
        "false"
    );

    let (_, _, code) = run_cli(home.path(), &["config", "get", "nope"]);
    assert_ne!(code, 0);
}

#[test]
fn test_now_runs() {
    let home = TempDir::new().unwrap();
    let out = run_ok(home.path(), &["now"]);
    assert_eq!(out.trim(), "lessons finished for today");
}

#[test]
fn test_completions() {
    let home = TempDir::new().unwrap();
    let out = run_ok(home.path(), &["completions", "bash"]);
    assert!(out.contains("studyhelper"));
}
