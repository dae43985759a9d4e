//! Integration tests for the focus CLI

use assert_cmd::cargo;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A focus command bound to a temporary database and a fixed day.
fn focus(temp: &TempDir, today: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("focus"));
    cmd.env_remove("FOCUS_DB")
        .env_remove("FOCUS_TODAY")
        .env_remove("RUST_LOG")
        .arg("--db")
        .arg(temp.path().join("tasks.json"))
        .arg("--today")
        .arg(today);
    cmd
}

#[test]
fn test_help() {
    Command::new(cargo::cargo_bin!("focus"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recurring tasks"));
}

#[test]
fn test_first_run_shows_seed_tasks() {
    let temp = TempDir::new().unwrap();
    focus(&temp, "2024-03-10")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Morning Routine"))
        .stdout(predicate::str::contains("Lunch Break"))
        // workouts and groceries have their own lists
        .stdout(predicate::str::contains("Grocery Run").not());

    assert!(temp.path().join("tasks.json").exists());
}

#[test]
fn test_done_advances_and_resets_next_day() {
    let temp = TempDir::new().unwrap();

    focus(&temp, "2024-03-08")
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("streak 1"))
        .stdout(predicate::str::contains("2024-03-09"));

    // hidden while done
    focus(&temp, "2024-03-08")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Morning Routine").not());

    // back the next day
    focus(&temp, "2024-03-09")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Morning Routine"));
}

#[test]
fn test_add_weekdays_task_and_complete_on_friday() {
    let temp = TempDir::new().unwrap();

    focus(&temp, "2024-03-08")
        .args(["add", "Stand-up", "--frequency", "weekdays", "--priority", "high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added"));

    focus(&temp, "2024-03-08")
        .args(["list", "--search", "stand"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stand-up"))
        .stdout(predicate::str::contains("Weekdays"));

    let raw = std::fs::read_to_string(temp.path().join("tasks.json")).unwrap();
    let tasks: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    focus(&temp, "2024-03-08")
        .args(["done", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("2024-03-11"));
}

#[test]
fn test_unknown_id_fails() {
    let temp = TempDir::new().unwrap();
    focus(&temp, "2024-03-10")
        .args(["done", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_invalid_frequency_is_rejected() {
    let temp = TempDir::new().unwrap();
    focus(&temp, "2024-03-10")
        .args(["add", "Thing", "--frequency", "hourly"])
        .assert()
        .failure();
}

#[test]
fn test_corrupt_file_falls_back_to_seed() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("tasks.json"), "{ definitely not tasks").unwrap();

    focus(&temp, "2024-03-10")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Morning Routine"));
}

#[test]
fn test_board_and_stats() {
    let temp = TempDir::new().unwrap();
    focus(&temp, "2024-03-10").args(["status", "2", "in-progress"]).assert().success();

    focus(&temp, "2024-03-10")
        .arg("board")
        .assert()
        .success()
        .stdout(predicate::str::contains("In Progress (1)"))
        .stdout(predicate::str::contains("To Do (1)"));

    focus(&temp, "2024-03-10").args(["done", "3"]).assert().success();
    focus(&temp, "2024-03-10")
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workouts done today"))
        .stdout(predicate::str::contains("5 Min Plank"));
}

#[test]
fn test_fitness_board_and_category_move() {
    let temp = TempDir::new().unwrap();
    focus(&temp, "2024-03-10").args(["done", "3"]).assert().success();

    focus(&temp, "2024-03-10")
        .args(["board", "--fitness"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fitness progress: 1/1 (100%)"))
        .stdout(predicate::str::contains("Daily Workout (1)"));

    focus(&temp, "2024-03-10").args(["edit", "3", "--category", "abs"]).assert().success();
    focus(&temp, "2024-03-10")
        .args(["board", "--fitness"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Daily Workout (0)"))
        .stdout(predicate::str::contains("Abs (1)"));
}

#[test]
fn test_edit_last_completed_from_cli() {
    let temp = TempDir::new().unwrap();
    focus(&temp, "2024-03-10")
        .args(["edit", "1", "--last-completed", "2024-03-10"])
        .assert()
        .success();
    focus(&temp, "2024-03-10").args(["done", "1"]).assert().success();

    let raw = std::fs::read_to_string(temp.path().join("tasks.json")).unwrap();
    let tasks: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let task = tasks.as_array().unwrap().iter().find(|t| t["id"] == "1").unwrap();
    assert_eq!(task["streak"], 0);
    assert_eq!(task["lastCompleted"], "2024-03-10");

    focus(&temp, "2024-03-10")
        .args(["edit", "1", "--last-completed", "2024-03-09", "--clear-last-completed"])
        .assert()
        .failure();
}

#[test]
fn test_assist_and_parse() {
    let temp = TempDir::new().unwrap();

    focus(&temp, "2024-03-10")
        .args(["assist", r#"{"id":"c1","name":"updateTaskStatus","args":{"id":"4","status":"Done"}}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Status updated"));

    focus(&temp, "2024-03-10")
        .args(["parse", "not a task"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nothing was added"));

    focus(&temp, "2024-03-10")
        .args(["list", "--view", "grocery", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"))
        .stdout(predicate::str::contains("2024-03-17"));
}
