use chrono::NaiveDate;
use focus_space::assistant::{add_from_text, dispatch, AssistantCall, FunctionCall, ParsedTask};
use focus_space::models::{Category, Frequency, Priority, Status};
use focus_space::storage::MemoryRepository;
use focus_space::store::TaskStore;
use serde_json::json;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn call(value: serde_json::Value) -> FunctionCall {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_parsed_task_from_response() {
    let parsed = ParsedTask::from_response(
        r#"{"title":"Pushups","status":"To Do","frequency":"Weekdays","priority":"High",
            "nextDue":"2024-03-11","reps":"3x12","isHomeWorkout":true,"category":"Abs"}"#,
    )
    .unwrap();

    let new = parsed.into_new_task();
    assert_eq!(new.title, "Pushups");
    assert_eq!(new.frequency, Frequency::Weekdays);
    assert_eq!(new.priority, Priority::High);
    assert_eq!(new.next_due, date("2024-03-11"));
    assert_eq!(new.category, Some(Category::Abs));
    assert_eq!(new.reps.as_deref(), Some("3x12"));
    assert!(new.is_home_workout);
}

#[test]
fn test_parser_defaults() {
    let parsed = ParsedTask::from_response(r#"{"title":"Call mom","nextDue":"2024-03-10"}"#).unwrap();
    assert_eq!(parsed.status, Status::Pending);
    assert_eq!(parsed.frequency, Frequency::Once);
    assert_eq!(parsed.priority, Priority::Medium);
}

#[test]
fn test_absent_parse_makes_no_change() {
    let today = date("2024-03-10");
    let (mut store, _) = TaskStore::open(MemoryRepository::new(), today);
    let writes = store.repository().writes();

    for text in ["", "   ", "sorry, no idea", r#"{"title":"  ","nextDue":"2024-03-10"}"#, r#"{"title":"x"}"#] {
        assert!(add_from_text(&mut store, &ParsedTask::from_response, text).is_none(), "{}", text);
    }
    let never = |_: &str| -> Option<ParsedTask> { None };
    assert!(add_from_text(&mut store, &never, "buy milk").is_none());

    assert_eq!(store.tasks().len(), 4);
    assert_eq!(store.repository().writes(), writes);
}

#[test]
fn test_custom_parser_adds_task() {
    let today = date("2024-03-10");
    let (mut store, _) = TaskStore::open(MemoryRepository::new(), today);
    let parser = |text: &str| {
        Some(ParsedTask {
            title: text.to_string(),
            status: Status::Pending,
            frequency: Frequency::Daily,
            priority: Priority::Low,
            next_due: today,
            category: None,
            reps: None,
            is_home_workout: None,
        })
    };

    let id = add_from_text(&mut store, &parser, "Water plants").unwrap();
    let task = store.get(&id).unwrap();
    assert_eq!(task.title, "Water plants");
    assert_eq!(task.frequency, Frequency::Daily);
}

#[test]
fn test_function_call_decoding() {
    let c = call(json!({ "name": "getTasks" }));
    assert_eq!(c.action().unwrap(), AssistantCall::GetTasks { list_name: None });

    let c = call(json!({ "name": "getTasks", "args": { "listName": "fitness" } }));
    assert_eq!(c.action().unwrap(), AssistantCall::GetTasks { list_name: Some("fitness".into()) });

    let c = call(json!({ "name": "updateTaskStatus", "args": { "id": "1", "status": "Done" } }));
    assert_eq!(
        c.action().unwrap(),
        AssistantCall::UpdateTaskStatus { id: "1".into(), status: Status::Completed }
    );

    assert!(call(json!({ "name": "deleteEverything" })).action().is_err());
    assert!(call(json!({ "name": "updateTaskStatus", "args": { "id": "1" } })).action().is_err());
}

#[test]
fn test_dispatch_get_tasks() {
    let today = date("2024-03-10");
    let (mut store, _) = TaskStore::open(MemoryRepository::new(), today);

    let reply = dispatch(&mut store, &call(json!({ "id": "c1", "name": "getTasks", "args": {} })), today);
    assert_eq!(reply.id.as_deref(), Some("c1"));
    assert_eq!(reply.name, "getTasks");
    let list = reply.response.as_array().unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list[0]["title"], "Morning Routine");
    assert_eq!(list[0]["status"], "To Do");

    let reply = dispatch(
        &mut store,
        &call(json!({ "name": "getTasks", "args": { "listName": "grocery" } })),
        today,
    );
    assert_eq!(reply.response.as_array().unwrap().len(), 1);
}

#[test]
fn test_dispatch_get_tasks_by_display_name() {
    let today = date("2024-03-10");
    let (mut store, _) = TaskStore::open(MemoryRepository::new(), today);

    let reply = dispatch(
        &mut store,
        &call(json!({ "name": "getTasks", "args": { "listName": "Grocery Run" } })),
        today,
    );
    let list = reply.response.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], "4");

    let reply = dispatch(
        &mut store,
        &call(json!({ "name": "getTasks", "args": { "listName": "All Tasks" } })),
        today,
    );
    assert_eq!(reply.response.as_array().unwrap().len(), 2);
}

#[test]
fn test_dispatch_add_task() {
    let today = date("2024-03-10");
    let (mut store, _) = TaskStore::open(MemoryRepository::new(), today);

    let reply = dispatch(
        &mut store,
        &call(json!({
            "name": "addTask",
            "args": {
                "title": "Squats", "status": "To Do", "priority": "High",
                "frequency": "Daily", "nextDue": "2024-03-10", "category": "Glutes", "reps": "3x15"
            }
        })),
        today,
    );

    assert_eq!(reply.response["result"], "Task added");
    let id = reply.response["id"].as_str().unwrap();
    let task = store.get(id).unwrap();
    assert_eq!(task.category, Some(Category::Glutes));
    assert_eq!(task.streak, 0);
}

#[test]
fn test_dispatch_update_status_runs_completion() {
    let today = date("2024-03-10");
    let (mut store, _) = TaskStore::open(MemoryRepository::new(), today);

    let reply = dispatch(
        &mut store,
        &call(json!({ "name": "updateTaskStatus", "args": { "id": "1", "status": "Done" } })),
        today,
    );
    assert_eq!(reply.response["result"], "Status updated");

    let task = store.get("1").unwrap();
    assert_eq!(task.status, Status::Completed);
    assert_eq!(task.streak, 1);
    assert_eq!(task.next_due, date("2024-03-11"));
}

#[test]
fn test_dispatch_errors_are_replies() {
    let today = date("2024-03-10");
    let (mut store, _) = TaskStore::open(MemoryRepository::new(), today);

    let reply = dispatch(
        &mut store,
        &call(json!({ "name": "updateTaskStatus", "args": { "id": "zzz", "status": "Done" } })),
        today,
    );
    assert!(reply.response["error"].as_str().unwrap().contains("not found"));

    let reply = dispatch(&mut store, &call(json!({ "name": "addTask", "args": { "title": "x" } })), today);
    assert!(reply.response.get("error").is_some());
    assert_eq!(store.tasks().len(), 4);
}
