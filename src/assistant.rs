//! Contracts with the AI collaborators.
//!
//! The natural-language parser and the voice assistant live outside this
//! crate. The parser hands back structured task fields (or nothing); the
//! assistant issues function calls. Both end up in the same store
//! operations the command line uses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::models::{Category, Frequency, NewTask, Priority, Status, Task};
use crate::storage::TaskRepository;
use crate::store::TaskStore;
use crate::views::View;

/// Task fields extracted from free text by the parser collaborator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTask {
    pub title: String,
    #[serde(default = "default_status")]
    pub status: Status,
    #[serde(default = "default_frequency")]
    pub frequency: Frequency,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    pub next_due: NaiveDate,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub reps: Option<String>,
    #[serde(default)]
    pub is_home_workout: Option<bool>,
}

fn default_status() -> Status {
    Status::Pending
}

fn default_frequency() -> Frequency {
    Frequency::Once
}

fn default_priority() -> Priority {
    Priority::Medium
}

impl ParsedTask {
    /// Reads the collaborator's JSON response. Empty or malformed text means
    /// no task could be constructed.
    pub fn from_response(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match serde_json::from_str::<ParsedTask>(text) {
            Ok(parsed) if !parsed.title.trim().is_empty() => Some(parsed),
            Ok(_) => {
                warn!("Parser returned a task without a title");
                None
            }
            Err(e) => {
                warn!("Could not read parser response: {}", e);
                None
            }
        }
    }

    pub fn into_new_task(self) -> NewTask {
        NewTask {
            title: self.title.trim().to_string(),
            status: self.status,
            frequency: self.frequency,
            priority: self.priority,
            next_due: self.next_due,
            category: self
                .category
                .filter(|c| !c.trim().is_empty())
                .map(|c| c.parse().unwrap_or(Category::Custom(c))),
            reps: self.reps,
            video_url: None,
            is_home_workout: self.is_home_workout.unwrap_or(false),
        }
    }
}

/// Turns free text into task fields. `None` means "could not construct a task".
pub trait TaskParser {
    fn parse(&self, text: &str) -> Option<ParsedTask>;
}

impl<F> TaskParser for F
where
    F: Fn(&str) -> Option<ParsedTask>,
{
    fn parse(&self, text: &str) -> Option<ParsedTask> {
        self(text)
    }
}

/// Runs `text` through `parser` and adds the result. Returns the new id, or
/// `None` (and leaves the store untouched) when the parser came back empty.
pub fn add_from_text<R, P>(store: &mut TaskStore<R>, parser: &P, text: &str) -> Option<String>
where
    R: TaskRepository,
    P: TaskParser + ?Sized,
{
    let parsed = parser.parse(text)?;
    Some(store.add(parsed.into_new_task()))
}

/// A function call issued by the voice assistant.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct FunctionCall {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

/// Reply sent back to the assistant session for one call.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FunctionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub response: Value,
}

/// The actions the assistant may take.
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantCall {
    GetTasks { list_name: Option<String> },
    AddTask(ParsedTask),
    UpdateTaskStatus { id: String, status: Status },
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GetTasksArgs {
    #[serde(default)]
    list_name: Option<String>,
}

#[derive(Deserialize)]
struct UpdateStatusArgs {
    id: String,
    status: Status,
}

impl FunctionCall {
    /// Decodes name and arguments into an action.
    pub fn action(&self) -> Result<AssistantCall, String> {
        let args = self.args.clone();
        match self.name.as_str() {
            "getTasks" => {
                let args: GetTasksArgs = if args.is_null() {
                    GetTasksArgs::default()
                } else {
                    serde_json::from_value(args).map_err(|e| e.to_string())?
                };
                Ok(AssistantCall::GetTasks { list_name: args.list_name })
            }
            "addTask" => serde_json::from_value(args)
                .map(AssistantCall::AddTask)
                .map_err(|e| e.to_string()),
            "updateTaskStatus" => {
                let args: UpdateStatusArgs = serde_json::from_value(args).map_err(|e| e.to_string())?;
                Ok(AssistantCall::UpdateTaskStatus { id: args.id, status: args.status })
            }
            other => Err(format!("Unknown function '{}'", other)),
        }
    }
}

/// Executes one assistant call against the store.
///
/// Errors are reported inside the response, never raised: the session keeps
/// going and the user can retry.
pub fn dispatch<R: TaskRepository>(
    store: &mut TaskStore<R>,
    call: &FunctionCall,
    today: NaiveDate,
) -> FunctionResponse {
    debug!(name = %call.name, "assistant call");
    let response = match call.action() {
        Ok(action) => run(store, action, today),
        Err(e) => {
            warn!("Rejected assistant call '{}': {}", call.name, e);
            json!({ "error": e })
        }
    };
    FunctionResponse {
        id: call.id.clone(),
        name: call.name.clone(),
        response,
    }
}

fn run<R: TaskRepository>(store: &mut TaskStore<R>, action: AssistantCall, today: NaiveDate) -> Value {
    match action {
        AssistantCall::GetTasks { list_name } => {
            let view = list_name
                .as_deref()
                .and_then(|l| l.parse::<View>().ok())
                .unwrap_or(View::Analytics);
            let tasks: Vec<Value> = store
                .tasks()
                .iter()
                .filter(|t| view.includes(t))
                .map(summary)
                .collect();
            Value::Array(tasks)
        }
        AssistantCall::AddTask(parsed) => {
            let id = store.add(parsed.into_new_task());
            json!({ "result": "Task added", "id": id })
        }
        AssistantCall::UpdateTaskStatus { id, status } => match store.set_status(&id, status, today) {
            Ok(_) => json!({ "result": "Status updated" }),
            Err(e) => json!({ "error": e.to_string() }),
        },
    }
}

fn summary(task: &Task) -> Value {
    json!({
        "id": task.id,
        "title": task.title,
        "status": task.status,
        "nextDue": task.next_due,
        "streak": task.streak,
    })
}
