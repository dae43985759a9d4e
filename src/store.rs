//! The in-memory task list and its only mutation entry points.
//!
//! A `TaskStore` can only be obtained through [`TaskStore::open`], which runs
//! normalization and the stale-task reset before handing the list out. Every
//! accepted mutation is followed by a best-effort save.

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::error::{FocusError, Result};
use crate::lifecycle;
use crate::migrate::normalize_all;
use crate::models::{NewTask, Status, Task, TaskEdit};
use crate::storage::{seed_tasks, TaskRepository};

/// What happened while opening the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupReport {
    /// Nothing usable was stored; the starter list was used.
    pub seeded: bool,
    /// Records rewritten by load-time normalization.
    pub migrated: usize,
    /// Stale recurring tasks returned to pending.
    pub reset: usize,
}

pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Loads tasks, falling back to the seed list when the repository is
    /// empty or unreadable, then runs the reset pass for `today`.
    pub fn open(repo: R, today: NaiveDate) -> (Self, StartupReport) {
        let mut report = StartupReport::default();

        let stored = match repo.load() {
            Ok(Some(stored)) if !stored.is_empty() => Some(stored),
            Ok(_) => None,
            Err(e) => {
                warn!("Discarding unreadable task data: {}", e);
                None
            }
        };

        let mut tasks = match stored {
            Some(stored) => {
                let (tasks, migrated) = normalize_all(stored);
                report.migrated = migrated;
                tasks
            }
            None => {
                report.seeded = true;
                seed_tasks(today)
            }
        };

        report.reset = lifecycle::reset_stale_tasks(&mut tasks, today);

        let mut store = TaskStore { repo, tasks };
        if report.seeded || report.migrated > 0 || report.reset > 0 {
            store.persist();
        }
        info!(
            tasks = store.tasks.len(),
            seeded = report.seeded,
            migrated = report.migrated,
            reset = report.reset,
            "task store opened"
        );
        (store, report)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Resolves a full id or a unique id prefix to the full id.
    pub fn resolve_id(&self, query: &str) -> Result<String> {
        if self.get(query).is_some() {
            return Ok(query.to_string());
        }
        let matches: Vec<&Task> = self.tasks.iter().filter(|t| t.id.starts_with(query)).collect();
        match matches.as_slice() {
            [only] => Ok(only.id.clone()),
            [] => Err(FocusError::TaskNotFound { id: query.to_string() }),
            many => Err(FocusError::AmbiguousId {
                prefix: query.to_string(),
                count: many.len(),
            }),
        }
    }

    /// Creates a task and returns its id. New tasks go to the front of the list.
    pub fn add(&mut self, new: NewTask) -> String {
        let id = self.fresh_id();
        let task = Task {
            id: id.clone(),
            title: new.title,
            status: new.status,
            frequency: new.frequency,
            priority: new.priority,
            next_due: new.next_due,
            last_completed: None,
            streak: 0,
            category: new.category,
            order: Some(self.tasks.len() as u32),
            reps: new.reps,
            video_url: new.video_url,
            is_home_workout: new.is_home_workout,
        };
        debug!(id = %id, title = %task.title, "task added");
        self.tasks.insert(0, task);
        self.persist();
        id
    }

    /// Applies direct field edits.
    pub fn update(&mut self, id: &str, edit: TaskEdit) -> Result<&Task> {
        let idx = self.index_of(id)?;
        lifecycle::apply_edit(&mut self.tasks[idx], edit);
        self.persist();
        Ok(&self.tasks[idx])
    }

    /// Moves a task to `status`; entering `Completed` runs the completion
    /// transition.
    pub fn set_status(&mut self, id: &str, status: Status, today: NaiveDate) -> Result<&Task> {
        let idx = self.index_of(id)?;
        if lifecycle::set_status(&mut self.tasks[idx], status, today) {
            self.persist();
        }
        Ok(&self.tasks[idx])
    }

    pub fn complete(&mut self, id: &str, today: NaiveDate) -> Result<&Task> {
        self.set_status(id, Status::Completed, today)
    }

    /// Deletes a task, returning it.
    pub fn delete(&mut self, id: &str) -> Result<Task> {
        let idx = self.index_of(id)?;
        let task = self.tasks.remove(idx);
        self.persist();
        Ok(task)
    }

    /// Moves a task to `position` in manual order and renumbers every task.
    pub fn move_task(&mut self, id: &str, position: usize) -> Result<()> {
        let mut ordered = self.by_order();
        let from = ordered
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FocusError::TaskNotFound { id: id.to_string() })?;
        let task = ordered.remove(from);
        ordered.insert(position.min(ordered.len()), task);
        self.tasks = renumber(ordered);
        self.persist();
        Ok(())
    }

    /// Restores the default manual order: ascending by id.
    pub fn reset_order(&mut self) {
        let mut ordered = std::mem::take(&mut self.tasks);
        ordered.sort_by(|a, b| a.id.cmp(&b.id));
        self.tasks = renumber(ordered);
        self.persist();
    }

    /// Removes every task and the stored data.
    pub fn clear(&mut self) -> Result<()> {
        self.tasks.clear();
        self.repo.clear()
    }

    /// Writes the current list. Failures are logged and otherwise ignored;
    /// the in-memory list stays authoritative.
    pub fn persist(&self) -> bool {
        match self.repo.save(&self.tasks) {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save tasks: {}", e);
                false
            }
        }
    }

    fn index_of(&self, id: &str) -> Result<usize> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| FocusError::TaskNotFound { id: id.to_string() })
    }

    fn by_order(&self) -> Vec<Task> {
        let mut ordered = self.tasks.clone();
        ordered.sort_by_key(|t| t.order.unwrap_or(u32::MAX));
        ordered
    }

    fn fresh_id(&self) -> String {
        loop {
            let id: String = uuid::Uuid::new_v4().simple().to_string().chars().take(8).collect();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn renumber(tasks: Vec<Task>) -> Vec<Task> {
    tasks
        .into_iter()
        .enumerate()
        .map(|(i, mut t)| {
            t.order = Some(i as u32);
            t
        })
        .collect()
}
