use std::io::{self, Write};

use chrono::NaiveDate;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::analytics::{trend, Dashboard};
use crate::assistant::{add_from_text, dispatch, FunctionCall, ParsedTask};
use crate::error::Result;
use crate::models::{NewTask, Priority, Status, Task, TaskEdit};
use crate::storage::TaskRepository;
use crate::store::TaskStore;
use crate::views::{filter_tasks, group_by_category, group_by_status, View};

/// Adds a new task and prints its id.
pub fn cmd_add<R: TaskRepository>(store: &mut TaskStore<R>, new: NewTask, silent: bool) -> String {
    let id = store.add(new);
    if !silent { println!("Task added (id = {})", id); }
    id
}

/// Lists tasks in a formatted table, in manual order.
///
/// By default, hides completed tasks unless `all` is true.
pub fn cmd_list<R: TaskRepository>(store: &TaskStore<R>, view: View, search: Option<&str>, all: bool, today: NaiveDate) {
    let mut tasks = filter_tasks(store.tasks(), view, search);
    if !all {
        tasks.retain(|t| t.status != Status::Completed);
    }
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
            Cell::new("Repeats").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Due").add_attribute(Attribute::Bold),
            Cell::new("Streak").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        table.add_row(vec![
            Cell::new(&t.id),
            Cell::new(title_cell(t)),
            Cell::new(t.status).fg(status_color(t.status)),
            Cell::new(t.frequency),
            Cell::new(t.priority).fg(priority_color(t.priority)),
            Cell::new(due_label(t.next_due, today)).fg(due_color(t, today)),
            Cell::new(t.streak),
            Cell::new(t.category.as_ref().map(|c| c.to_string()).unwrap_or_default()),
        ]);
    }

    println!("{table}");
}

/// Prints the kanban board: one column per status.
pub fn cmd_board<R: TaskRepository>(store: &TaskStore<R>, search: Option<&str>) {
    let tasks = filter_tasks(store.tasks(), View::ByStatus, search);
    let board = group_by_status(tasks);
    let columns = board.columns();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(columns.iter().map(|(status, tasks)| {
            Cell::new(format!("{} ({})", status, tasks.len()))
                .add_attribute(Attribute::Bold)
                .fg(status_color(*status))
        }));

    let rows = columns.iter().map(|(_, tasks)| tasks.len()).max().unwrap_or(0);
    for i in 0..rows {
        table.add_row(columns.iter().map(|(_, tasks)| {
            tasks
                .get(i)
                .map(|t| format!("{} [{}]", t.title, t.id))
                .unwrap_or_default()
        }));
    }

    println!("{table}");
}

/// Prints the workout board: one column per fitness category, plus progress.
pub fn cmd_fitness_board<R: TaskRepository>(store: &TaskStore<R>, search: Option<&str>) {
    let tasks = filter_tasks(store.tasks(), View::Fitness, search);
    let board = group_by_category(tasks);

    println!("Fitness progress: {}/{} ({}%)", board.done, board.total, board.progress());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(board.columns.iter().map(|(category, tasks)| {
            Cell::new(format!("{} ({})", category, tasks.len())).add_attribute(Attribute::Bold)
        }));

    let rows = board.columns.iter().map(|(_, tasks)| tasks.len()).max().unwrap_or(0);
    for i in 0..rows {
        table.add_row(board.columns.iter().map(|(_, tasks)| match tasks.get(i) {
            Some(t) => Cell::new(format!("{} [{}]", title_cell(t), t.id)).fg(status_color(t.status)),
            None => Cell::new(""),
        }));
    }

    println!("{table}");
}

/// Marks a task as done on `today`.
pub fn cmd_complete<R: TaskRepository>(store: &mut TaskStore<R>, id: &str, today: NaiveDate, silent: bool) -> Result<()> {
    let id = store.resolve_id(id)?;
    let task = store.complete(&id, today)?;
    if !silent {
        println!("Task {} marked as done (streak {}).", task.id, task.streak);
        if task.frequency.is_recurring() {
            println!("Next due on {}", task.next_due);
        }
    }
    Ok(())
}

/// Moves a task to another status column.
pub fn cmd_status<R: TaskRepository>(store: &mut TaskStore<R>, id: &str, status: Status, today: NaiveDate, silent: bool) -> Result<()> {
    let id = store.resolve_id(id)?;
    let task = store.set_status(&id, status, today)?;
    if !silent { println!("Task {} is now {}.", task.id, task.status); }
    Ok(())
}

/// Edits an existing task's details.
pub fn cmd_edit<R: TaskRepository>(store: &mut TaskStore<R>, id: &str, edit: TaskEdit, silent: bool) -> Result<()> {
    let id = store.resolve_id(id)?;
    store.update(&id, edit)?;
    if !silent { println!("Task {} updated.", id); }
    Ok(())
}

/// Removes a task by id.
pub fn cmd_remove<R: TaskRepository>(store: &mut TaskStore<R>, id: &str, silent: bool) -> Result<()> {
    let id = store.resolve_id(id)?;
    let task = store.delete(&id)?;
    if !silent { println!("Task {} removed ({}).", task.id, task.title); }
    Ok(())
}

/// Moves a task to a new position in manual order (0-based).
pub fn cmd_move<R: TaskRepository>(store: &mut TaskStore<R>, id: &str, position: usize, silent: bool) -> Result<()> {
    let id = store.resolve_id(id)?;
    store.move_task(&id, position)?;
    if !silent { println!("Task {} moved to position {}.", id, position); }
    Ok(())
}

pub fn cmd_reset_order<R: TaskRepository>(store: &mut TaskStore<R>, silent: bool) {
    store.reset_order();
    if !silent { println!("Manual order reset."); }
}

/// Prints the analytics dashboard and a `days`-long completion trend.
pub fn cmd_stats<R: TaskRepository>(store: &TaskStore<R>, today: NaiveDate, days: u64) {
    let d = Dashboard::compute(store.tasks(), today);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Completed today".to_string(), d.completed_today.to_string()]);
    table.add_row(vec!["Workouts done today".to_string(), d.fitness_completed_today.to_string()]);
    table.add_row(vec!["Due today".to_string(), d.due_today.to_string()]);
    table.add_row(vec!["Completion rate".to_string(), format!("{}% ({}/{})", d.completion_rate, d.completed, d.total)]);
    table.add_row(vec!["Best streak".to_string(), format!("{} days", d.best_streak)]);
    println!("{table}");

    if !d.top_streaks.is_empty() {
        let mut streaks = Table::new();
        streaks.load_preset(UTF8_FULL).set_header(vec!["Top streaks", "Days"]);
        for (title, streak) in &d.top_streaks {
            streaks.add_row(vec![title.clone(), streak.to_string()]);
        }
        println!("{streaks}");
    }

    const SHADES: [char; 5] = ['·', '░', '▒', '▓', '█'];
    let heat: String = d.heatmap.iter().map(|day| SHADES[day.intensity() as usize]).collect();
    println!("30-day consistency: {}", heat);

    let mut growth = Table::new();
    growth.load_preset(UTF8_FULL).set_header(vec!["Day", "Completed", "Workouts"]);
    for point in trend(store.tasks(), today, days) {
        growth.add_row(vec![
            point.date.format("%a %b %d").to_string(),
            point.total.to_string(),
            point.fitness.to_string(),
        ]);
    }
    println!("{growth}");
}

/// Adds a task from the natural-language parser's response.
///
/// Prints a notice and changes nothing if the response holds no usable task.
pub fn cmd_parse<R: TaskRepository>(store: &mut TaskStore<R>, response: &str, silent: bool) -> Option<String> {
    match add_from_text(store, &ParsedTask::from_response, response) {
        Some(id) => {
            if !silent { println!("Task added (id = {})", id); }
            Some(id)
        }
        None => {
            if !silent { eprintln!("Could not understand that task. Nothing was added."); }
            None
        }
    }
}

/// Runs one voice-assistant function call and prints the JSON reply.
pub fn cmd_assist<R: TaskRepository>(store: &mut TaskStore<R>, call: &str, today: NaiveDate) -> Result<()> {
    let call: FunctionCall = serde_json::from_str(call)?;
    let response = dispatch(store, &call, today);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Deletes every task and the data file.
pub fn cmd_reset<R: TaskRepository>(store: &mut TaskStore<R>, force: bool) -> Result<()> {
    if !force {
        print!("Are you sure you want to delete all tasks? This cannot be undone. [y/N] ");
        io::stdout().flush().ok();
        let mut input = String::new();
        io::stdin().read_line(&mut input).ok();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return Ok(());
        }
    }

    store.clear()?;
    println!("Database reset successfully.");
    Ok(())
}

fn title_cell(t: &Task) -> String {
    match &t.reps {
        Some(reps) if t.is_home_workout => format!("{} ({}, home)", t.title, reps),
        Some(reps) => format!("{} ({})", t.title, reps),
        None => t.title.clone(),
    }
}

fn due_label(due: NaiveDate, today: NaiveDate) -> String {
    let days_left = (due - today).num_days();
    if days_left < 0 {
        format!("{} ({}d overdue)", due, days_left.abs())
    } else if days_left == 0 {
        "Today".to_string()
    } else if days_left == 1 {
        "Tomorrow".to_string()
    } else {
        due.to_string()
    }
}

fn due_color(t: &Task, today: NaiveDate) -> Color {
    if t.status == Status::Completed {
        Color::Grey
    } else if t.next_due < today {
        Color::Red
    } else if t.next_due == today {
        Color::Yellow
    } else {
        Color::Reset
    }
}

fn status_color(status: Status) -> Color {
    match status {
        Status::Pending => Color::Yellow,
        Status::InProgress => Color::Cyan,
        Status::Completed => Color::Green,
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}
