//! Status transitions with scheduling side effects.
//!
//! Only two transitions touch the schedule: entering `Completed` (streak and
//! next-due advance) and the startup reset that returns stale recurring tasks
//! to `Pending`. Everything else is a plain field write.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Status, Task, TaskEdit};
use crate::recurrence::compute_next_due;

/// A completed recurring task whose due day has arrived or passed.
pub fn is_stale(task: &Task, today: NaiveDate) -> bool {
    task.status == Status::Completed && task.next_due <= today && task.frequency.is_recurring()
}

/// Returns every stale task to `Pending`, leaving all other fields alone.
///
/// Returns the number of tasks changed. A second pass over the result always
/// returns 0.
pub fn reset_stale_tasks(tasks: &mut [Task], today: NaiveDate) -> usize {
    let mut reset = 0;
    for task in tasks.iter_mut().filter(|t| is_stale(t, today)) {
        debug!(id = %task.id, next_due = %task.next_due, "resetting stale task");
        task.status = Status::Pending;
        reset += 1;
    }
    reset
}

/// Marks a task done on `today`.
///
/// The streak grows at most once per calendar day. Recurring tasks have
/// `next_due` recomputed from `today`; `Once` tasks keep theirs.
pub fn complete_task(task: &mut Task, today: NaiveDate) {
    task.status = Status::Completed;

    if task.last_completed != Some(today) {
        task.streak = task.streak.saturating_add(1);
        task.last_completed = Some(today);
    }

    if task.frequency.is_recurring() {
        task.next_due = compute_next_due(task.frequency, today);
    }

    debug!(
        id = %task.id,
        streak = task.streak,
        next_due = %task.next_due,
        "task completed"
    );
}

/// Moves a task to `status`, returning whether anything changed.
///
/// Leaving `Completed` is a correction only: streak and `next_due` are not
/// rolled back.
pub fn set_status(task: &mut Task, status: Status, today: NaiveDate) -> bool {
    if status == Status::Completed {
        let before = task.clone();
        complete_task(task, today);
        return *task != before;
    }
    if task.status == status {
        return false;
    }
    task.status = status;
    true
}

/// Applies direct field edits. Never triggers recurrence logic.
///
/// Setting `last_completed` by hand moves the same-day streak guard with it:
/// clearing it lets the next completion count again.
pub fn apply_edit(task: &mut Task, edit: TaskEdit) {
    let TaskEdit {
        title,
        frequency,
        priority,
        next_due,
        last_completed,
        category,
        reps,
        video_url,
        is_home_workout,
    } = edit;

    if let Some(t) = title { task.title = t; }
    if let Some(f) = frequency { task.frequency = f; }
    if let Some(p) = priority { task.priority = p; }
    if let Some(d) = next_due { task.next_due = d; }
    if let Some(d) = last_completed { task.last_completed = d; }
    if let Some(c) = category { task.category = c; }
    if let Some(r) = reps { task.reps = r; }
    if let Some(u) = video_url { task.video_url = u; }
    if let Some(h) = is_home_workout { task.is_home_workout = h; }
}
