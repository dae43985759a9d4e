use chrono::NaiveDate;
use focus_space::commands::*;
use focus_space::models::{Frequency, NewTask, Status, TaskEdit};
use focus_space::storage::JsonFileRepository;
use focus_space::store::TaskStore;
use tempfile::TempDir;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Opens a store on a fresh file, runs `f`, then reopens the file so the
/// test can check what was actually saved.
fn with_test_db<F>(today: NaiveDate, f: F) -> TaskStore<JsonFileRepository>
where
    F: FnOnce(&mut TaskStore<JsonFileRepository>),
{
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    let (mut store, _) = TaskStore::open(JsonFileRepository::new(&path), today);
    f(&mut store);
    let (reopened, _) = TaskStore::open(JsonFileRepository::new(&path), today);
    reopened
}

#[test]
fn test_add_and_list() {
    let today = date("2025-12-01");
    let store = with_test_db(today, |store| {
        let id = cmd_add(store, NewTask::new("Test Task", today).frequency(Frequency::Weekly), true);
        assert_eq!(store.tasks()[0].id, id);
    });

    assert_eq!(store.tasks().len(), 5);
    assert_eq!(store.tasks()[0].title, "Test Task");
    assert_eq!(store.tasks()[0].frequency, Frequency::Weekly);
}

#[test]
fn test_complete_task() {
    let today = date("2025-12-01");
    let store = with_test_db(today, |store| {
        cmd_complete(store, "1", today, true).unwrap();
    });

    let t = store.get("1").unwrap();
    assert_eq!(t.status, Status::Completed);
    assert_eq!(t.streak, 1);
    assert_eq!(t.next_due, date("2025-12-02"));
}

#[test]
fn test_complete_by_prefix() {
    let today = date("2025-12-01");
    let mut added = String::new();
    let store = with_test_db(today, |store| {
        added = cmd_add(store, NewTask::new("One-off", today), true);
        cmd_complete(store, &added[..4], today, true).unwrap();
    });
    assert_eq!(store.get(&added).unwrap().status, Status::Completed);
}

#[test]
fn test_completed_task_comes_back_next_cycle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");

    let monday = date("2025-12-01");
    let (mut store, _) = TaskStore::open(JsonFileRepository::new(&path), monday);
    cmd_complete(&mut store, "1", monday, true).unwrap();
    drop(store);

    // same day: still done
    let (store, report) = TaskStore::open(JsonFileRepository::new(&path), monday);
    assert_eq!(report.reset, 0);
    assert_eq!(store.get("1").unwrap().status, Status::Completed);
    drop(store);

    // next day: back to pending, streak kept
    let (store, report) = TaskStore::open(JsonFileRepository::new(&path), date("2025-12-02"));
    assert_eq!(report.reset, 1);
    let t = store.get("1").unwrap();
    assert_eq!(t.status, Status::Pending);
    assert_eq!(t.streak, 1);
}

#[test]
fn test_status_edit_remove() {
    let today = date("2025-12-01");
    let store = with_test_db(today, |store| {
        cmd_status(store, "2", Status::InProgress, today, true).unwrap();
        cmd_edit(
            store,
            "1",
            TaskEdit { title: Some("Sunrise Routine".into()), ..Default::default() },
            true,
        )
        .unwrap();
        cmd_remove(store, "3", true).unwrap();
        assert!(cmd_remove(store, "3", true).is_err());
    });

    assert_eq!(store.get("2").unwrap().status, Status::InProgress);
    assert_eq!(store.get("1").unwrap().title, "Sunrise Routine");
    assert!(store.get("3").is_none());
}

#[test]
fn test_move_and_reset_order() {
    let today = date("2025-12-01");
    let store = with_test_db(today, |store| {
        cmd_move(store, "3", 0, true).unwrap();
        assert_eq!(store.get("3").unwrap().order, Some(0));
        cmd_reset_order(store, true);
    });
    assert_eq!(store.get("3").unwrap().order, Some(2));
}

#[test]
fn test_parse_command() {
    let today = date("2025-12-01");
    let store = with_test_db(today, |store| {
        assert!(cmd_parse(store, "gibberish", true).is_none());
        let id = cmd_parse(
            store,
            r#"{"title":"Dentist","status":"To Do","frequency":"Once","priority":"High","nextDue":"2025-12-05"}"#,
            true,
        );
        assert!(id.is_some());
    });
    assert_eq!(store.tasks().len(), 5);
    assert_eq!(store.tasks()[0].title, "Dentist");
}

#[test]
fn test_reset_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    let today = date("2025-12-01");

    let (mut store, _) = TaskStore::open(JsonFileRepository::new(&path), today);
    assert!(path.exists());
    cmd_reset(&mut store, true).unwrap();
    assert!(store.tasks().is_empty());
    assert!(!path.exists());
}
