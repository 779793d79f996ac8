//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_muhasabah"))
        .args(args)
        .env("MUHASABAH_HOME", home)
        .env_remove("MUHASABAH_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["--json"];
    full.extend_from_slice(args);
    let (code, stdout, stderr) = run_cli(home, &full);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_on_fresh_install() {
    let home = tempfile::tempdir().unwrap();
    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["profile"]["level"], 1);
    assert_eq!(status["profile"]["name"], "Servant");
    assert_eq!(status["targets"]["pushups"], 20);
    assert_eq!(status["targets"]["plank"], 60);
    assert_eq!(status["rank"], "E");
    assert!(home.path().join("muhasabah.db").exists());
}

#[test]
fn test_status_text() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["status"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Level 1"));
    assert!(stdout.contains("pushups"));
    assert!(stdout.contains("Fajr"));
}

#[test]
fn test_exercise_completion_persists_and_rewards() {
    let home = tempfile::tempdir().unwrap();
    let events = run_json(home.path(), &["exercise", "set", "pushups", "25"]);
    let events = events.as_array().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "GoalCompleted");
    assert_eq!(events[0]["exp"], 10);

    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["profile"]["exp"], 10);
    let pushups = &status["goals"]["exercises"][0];
    assert_eq!(pushups["id"], "pushups");
    assert_eq!(pushups["currentProgress"], 20);

    // Completing again pays nothing.
    let again = run_json(home.path(), &["exercise", "add", "pushups", "5"]);
    assert!(again.as_array().unwrap().is_empty());
}

#[test]
fn test_unknown_exercise_fails() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["exercise", "set", "burpees", "5"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_negative_progress_clamps_to_zero() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["exercise", "set", "squats", "12"]);
    run_json(home.path(), &["exercise", "add", "squats", "-50"]);
    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["goals"]["exercises"][1]["currentProgress"], 0);
}

#[test]
fn test_salah_toggle() {
    let home = tempfile::tempdir().unwrap();
    let events = run_json(home.path(), &["salah", "toggle", "fajr"]);
    assert_eq!(events[0]["type"], "GoalCompleted");
    run_json(home.path(), &["salah", "toggle", "fajr"]);
    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["goals"]["salah"][0]["completed"], false);
    assert_eq!(status["profile"]["exp"], 5);
}

#[test]
fn test_task_lifecycle() {
    let home = tempfile::tempdir().unwrap();
    run_json(
        home.path(),
        &["task", "add", "Read Riyad", "--category", "intellectual", "--mode", "minutes", "--target", "20"],
    );
    let tasks = run_json(home.path(), &["task", "list"]);
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["unit"], "min");
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    let events = run_json(home.path(), &["task", "progress", &id, "25"]);
    assert_eq!(events[0]["type"], "GoalCompleted");
    assert_eq!(events[0]["exp"], 5);

    run_json(home.path(), &["task", "remove", &id]);
    let tasks = run_json(home.path(), &["task", "list"]);
    assert!(tasks.as_array().unwrap().is_empty());

    let (code, _, _) = run_cli(home.path(), &["task", "remove", &id]);
    assert_eq!(code, 1);
}

#[test]
fn test_task_add_rejects_empty_title() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["task", "add", "   "]);
    assert_eq!(code, 0);
    assert!(stderr.contains("notice:"));
    assert!(stderr.contains("title"));

    let events = run_json(home.path(), &["task", "add", "Walk", "--target", "0", "--mode", "minutes"]);
    assert!(events.as_array().unwrap().is_empty());
    let tasks = run_json(home.path(), &["task", "list"]);
    assert!(tasks.as_array().unwrap().is_empty());
}

#[test]
fn test_recovery_requires_streak() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["recovery", "activate"]);
    assert_eq!(code, 0);
    assert!(stderr.contains("notice:"));
    assert!(stderr.contains("streak"));
    let events = run_json(home.path(), &["recovery", "activate"]);
    assert!(events.as_array().unwrap().is_empty());
    let status = run_json(home.path(), &["recovery", "status"]);
    assert_eq!(status["status"], "locked");
}

#[test]
fn test_theme_and_sound() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["theme", "set", "gold"]);
    run_json(home.path(), &["sound", "toggle"]);
    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["profile"]["theme"], "gold");
    assert_eq!(status["profile"]["soundEnabled"], false);

    let (code, _, _) = run_cli(home.path(), &["theme", "set", "pink"]);
    assert_eq!(code, 1);
}

#[test]
fn test_study_and_reflection_award_exp() {
    let home = tempfile::tempdir().unwrap();
    run_json(home.path(), &["study", "add", "30"]);
    run_json(home.path(), &["reflect", "Patience today"]);
    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["goals"]["study_minutes"], 30);
    assert_eq!(status["profile"]["exp"], 11);
    assert_eq!(status["profile"]["reflections"][0]["note"], "Patience today");
}

#[test]
fn test_empty_reflection_is_ignored() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["reflect", "  "]);
    assert_eq!(code, 0);
    assert!(stderr.contains("empty"));
    let status = run_json(home.path(), &["status"]);
    assert_eq!(status["profile"]["exp"], 0);
    assert!(status["profile"]["reflections"].as_array().unwrap().is_empty());
}

#[test]
fn test_check_without_day_change() {
    let home = tempfile::tempdir().unwrap();
    let events = run_json(home.path(), &["check"]);
    assert!(events.as_array().unwrap().is_empty());
}

#[test]
fn test_history_empty() {
    let home = tempfile::tempdir().unwrap();
    let history = run_json(home.path(), &["history"]);
    assert_eq!(history["report"]["days"], 0);
    assert_eq!(history["report"]["sync_rank"], "E-RANK");
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "watch.poll_interval_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "60");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "watch.poll_interval_secs", "5"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "watch.poll_interval_secs"]);
    assert_eq!(stdout.trim(), "5");

    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "watch.nope", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}
