use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::error::{FocusError, Result};
use crate::migrate::StoredTask;
use crate::models::{Category, Frequency, Priority, Status, Task};

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `FOCUS_DB` environment variable.
/// 2. `~/.local/share/focus-space/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
pub fn default_db_path() -> PathBuf {
    std::env::var("FOCUS_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("focus-space");
        p.push("tasks.json");
        p
    })
}

/// Where tasks are loaded from at startup and saved to after each change.
pub trait TaskRepository {
    /// Returns `None` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<StoredTask>>>;
    fn save(&self, tasks: &[Task]) -> Result<()>;
    /// Removes everything stored.
    fn clear(&self) -> Result<()>;
}

/// Stores the task list as a pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileRepository { path: path.into() }
    }
}

impl TaskRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Vec<StoredTask>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let s = fs::read_to_string(&self.path).map_err(|e| FocusError::io(&self.path, e))?;
        let tasks = serde_json::from_str(&s)?;
        Ok(Some(tasks))
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| FocusError::io(dir, e))?;
        }
        let s = serde_json::to_string_pretty(tasks)?;
        fs::write(&self.path, s).map_err(|e| FocusError::io(&self.path, e))
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| FocusError::io(&self.path, e))?;
        }
        Ok(())
    }
}

/// Keeps the serialized list in memory. Used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    data: RefCell<Option<String>>,
    fail_writes: Cell<bool>,
    writes: Cell<usize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with the given raw JSON, as if it had been read from disk.
    pub fn with_json(json: impl Into<String>) -> Self {
        let repo = Self::default();
        *repo.data.borrow_mut() = Some(json.into());
        repo
    }

    /// Makes every subsequent `save` fail.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Number of successful saves so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    pub fn raw(&self) -> Option<String> {
        self.data.borrow().clone()
    }
}

impl TaskRepository for MemoryRepository {
    fn load(&self) -> Result<Option<Vec<StoredTask>>> {
        match self.data.borrow().as_deref() {
            Some(s) => Ok(Some(serde_json::from_str(s)?)),
            None => Ok(None),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        if self.fail_writes.get() {
            return Err(FocusError::io(
                "<memory>",
                std::io::Error::other("simulated write failure"),
            ));
        }
        *self.data.borrow_mut() = Some(serde_json::to_string(tasks)?);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.data.borrow_mut() = None;
        Ok(())
    }
}

/// Starter tasks used when nothing usable is stored.
pub fn seed_tasks(today: NaiveDate) -> Vec<Task> {
    let base = |id: &str, title: &str, frequency, priority, order| Task {
        id: id.to_string(),
        title: title.to_string(),
        status: Status::Pending,
        frequency,
        priority,
        next_due: today,
        last_completed: None,
        streak: 0,
        category: None,
        order: Some(order),
        reps: None,
        video_url: None,
        is_home_workout: false,
    };

    let mut plank = base("3", "5 Min Plank", Frequency::Daily, Priority::High, 2);
    plank.category = Some(Category::DailyWorkout);
    plank.reps = Some("5 mins".to_string());
    plank.is_home_workout = true;

    let mut groceries = base("4", "Grocery Run", Frequency::Weekly, Priority::Medium, 3);
    groceries.category = Some(Category::Grocery);

    vec![
        base("1", "Morning Routine", Frequency::Daily, Priority::High, 0),
        base("2", "Lunch Break", Frequency::Daily, Priority::Medium, 1),
        plank,
        groceries,
    ]
}
