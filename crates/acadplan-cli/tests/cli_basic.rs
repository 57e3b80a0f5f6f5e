//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temporary data directory and
//! verify outputs.

mod common;

use common::{
    assert_contains, created_id, parse_json, run_cli, run_cli_failure, run_cli_success,
};
use tempfile::TempDir;

fn add_subject(dir: &TempDir, name: &str, course_load: &str) -> String {
    let out = run_cli_success(
        dir.path(),
        &["subject", "add", name, "--course-load", course_load, "--color", "#123456"],
    );
    created_id(&out)
}

#[test]
fn test_subject_add_and_list() {
    let dir = TempDir::new().unwrap();
    let id = add_subject(&dir, "Physics", "60");

    let out = run_cli_success(dir.path(), &["subject", "list", "--json"]);
    let subjects: serde_json::Value = parse_json(&out);
    let subjects = subjects.as_array().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0]["id"], id.as_str());
    assert_eq!(subjects[0]["name"], "Physics");
    assert_eq!(subjects[0]["absences"], 0);
}

#[test]
fn test_subject_add_rejects_blank_name() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["subject", "add", "   "]);
    assert_contains(&stderr, "must not be empty");
}

#[test]
fn test_absence_add_remove_and_status() {
    let dir = TempDir::new().unwrap();
    let id = add_subject(&dir, "Physics", "60");

    for _ in 0..5 {
        run_cli_success(dir.path(), &["absence", "add", &id]);
    }
    let out = run_cli_success(dir.path(), &["absence", "status", "--json"]);
    let rows: serde_json::Value = parse_json(&out);
    assert_eq!(rows[0]["absences"], 5);
    assert_eq!(rows[0]["risk_level"], "safe");
    assert_eq!(rows[0]["max_allowed_absence_sessions"], 18);

    let out = run_cli_success(dir.path(), &["absence", "status"]);
    assert_contains(&out, "6.9%");
}

#[test]
fn test_absence_remove_at_zero_is_no_op() {
    let dir = TempDir::new().unwrap();
    let id = add_subject(&dir, "Biology", "30");

    let out = run_cli_success(dir.path(), &["absence", "remove", &id]);
    assert_contains(&out, "0 absence(s)");
}

#[test]
fn test_absence_unknown_subject_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(dir.path(), &["absence", "add", "missing"]);
    assert_contains(&stderr, "Subject not found");
}

#[test]
fn test_unknown_ids_do_not_write() {
    let dir = TempDir::new().unwrap();
    run_cli_failure(dir.path(), &["absence", "add", "missing"]);
    run_cli_failure(dir.path(), &["absence", "remove", "missing"]);
    let (_, stderr, _) = run_cli_failure(dir.path(), &["task", "toggle", "missing"]);
    assert_contains(&stderr, "Task not found");

    let db = acadplan_core::Database::open_at(&dir.path().join("acadplan.db")).unwrap();
    assert!(db.kv_get("subjects").unwrap().is_none());
    assert!(db.kv_get("tasks").unwrap().is_none());
}

#[test]
fn test_task_lifecycle() {
    let dir = TempDir::new().unwrap();
    let subject = add_subject(&dir, "History", "45");

    let late = created_id(&run_cli_success(
        dir.path(),
        &["task", "add", "Essay", "--subject", &subject, "--due", "2000-01-02"],
    ));
    run_cli_success(
        dir.path(),
        &["task", "add", "Exam", "--subject", &subject, "--due", "2999-01-01"],
    );
    run_cli_success(
        dir.path(),
        &["task", "add", "Reading", "--subject", &subject, "--due", "2000-01-01"],
    );

    let out = run_cli_success(dir.path(), &["task", "list", "--json"]);
    let cards: serde_json::Value = parse_json(&out);
    let titles: Vec<&str> = cards
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["task"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Reading", "Essay", "Exam"]);
    assert_eq!(cards[1]["derived"], "overdue");
    assert_eq!(cards[2]["derived"], "pending");

    let out = run_cli_success(dir.path(), &["task", "toggle", &late]);
    assert_contains(&out, "completed");
    let out = run_cli_success(dir.path(), &["task", "toggle", &late]);
    assert_contains(&out, "overdue");

    run_cli_success(dir.path(), &["task", "delete", &late]);
    let out = run_cli_success(dir.path(), &["task", "list", "--json"]);
    let cards: serde_json::Value = parse_json(&out);
    assert_eq!(cards.as_array().unwrap().len(), 2);
}

#[test]
fn test_task_add_requires_known_subject_and_valid_date() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, _) = run_cli_failure(
        dir.path(),
        &["task", "add", "Essay", "--subject", "nope", "--due", "2024-01-01"],
    );
    assert_contains(&stderr, "Subject not found");

    let subject = add_subject(&dir, "History", "45");
    let (_, _, code) = run_cli(
        dir.path(),
        &["task", "add", "Essay", "--subject", &subject, "--due", "soon"],
    );
    assert_ne!(code, 0);
}

#[test]
fn test_subject_delete_cascades() {
    let dir = TempDir::new().unwrap();
    let subject = add_subject(&dir, "Art", "20");
    run_cli_success(
        dir.path(),
        &["task", "add", "Sketch", "--subject", &subject, "--due", "2030-05-05"],
    );

    let out = run_cli_success(dir.path(), &["subject", "delete", &subject]);
    assert_contains(&out, "1 task(s) removed");

    let out = run_cli_success(dir.path(), &["task", "list", "--json"]);
    let cards: serde_json::Value = parse_json(&out);
    assert!(cards.as_array().unwrap().is_empty());
}

#[test]
fn test_board_json() {
    let dir = TempDir::new().unwrap();
    add_subject(&dir, "Physics", "60");
    run_cli_success(dir.path(), &["subject", "add", "Drawing"]);

    let out = run_cli_success(dir.path(), &["board", "--json"]);
    let board: serde_json::Value = parse_json(&out);
    assert_eq!(board["subjects"].as_array().unwrap().len(), 2);
    assert_eq!(board["attendance"].as_array().unwrap().len(), 1);
    assert!(board["tasks"].as_array().unwrap().is_empty());

    let out = run_cli_success(dir.path(), &["board"]);
    assert_contains(&out, "Absences");
}

#[test]
fn test_config_get_set_reset() {
    let dir = TempDir::new().unwrap();
    let out = run_cli_success(dir.path(), &["config", "get", "display.fallback_subject_label"]);
    assert_eq!(out.trim(), "No subject");

    run_cli_success(dir.path(), &["config", "set", "display.percentage_decimals", "2"]);
    let out = run_cli_success(dir.path(), &["config", "get", "display.percentage_decimals"]);
    assert_eq!(out.trim(), "2");

    run_cli_failure(dir.path(), &["config", "set", "display.nope", "1"]);
    let (_, stderr, _) = run_cli_failure(
        dir.path(),
        &["config", "set", "display.percentage_decimals", "4000000000"],
    );
    assert_contains(&stderr, "must be at most");

    run_cli_success(dir.path(), &["config", "reset"]);
    let out = run_cli_success(dir.path(), &["config", "get", "display.percentage_decimals"]);
    assert_eq!(out.trim(), "1");
}
