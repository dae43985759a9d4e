use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::FocusError;
use crate::models::{squash, Category, Status, Task};

/// The lists the application shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Everything that is neither a workout nor a grocery item.
    AllTasks,
    Grocery,
    /// Same tasks as `AllTasks`, grouped into kanban columns.
    ByStatus,
    Fitness,
    Analytics,
}

impl View {
    pub fn includes(self, task: &Task) -> bool {
        match self {
            View::Analytics => true,
            View::Grocery => task.is_grocery(),
            View::Fitness => task.is_fitness(),
            View::AllTasks | View::ByStatus => !task.is_fitness() && !task.is_grocery(),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            View::AllTasks => "All Tasks",
            View::Grocery => "Grocery Run",
            View::ByStatus => "By Status",
            View::Fitness => "Fitness",
            View::Analytics => "Analytics",
        })
    }
}

impl FromStr for View {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "all" | "tasks" | "alltasks" => Ok(View::AllTasks),
            "grocery" | "groceries" | "groceryrun" => Ok(View::Grocery),
            "status" | "bystatus" | "board" => Ok(View::ByStatus),
            "fitness" => Ok(View::Fitness),
            "analytics" | "everything" => Ok(View::Analytics),
            _ => Err(FocusError::InvalidValue {
                field: "view",
                input: s.to_string(),
                expected: "all, grocery, status, fitness, analytics",
            }),
        }
    }
}

/// Tasks in `view` whose title contains `search` (case-insensitive), in
/// manual order. Tasks without an order come last.
pub fn filter_tasks<'a>(tasks: &'a [Task], view: View, search: Option<&str>) -> Vec<&'a Task> {
    let needle = search.map(str::to_lowercase).filter(|s| !s.is_empty());
    let mut out: Vec<&Task> = tasks
        .iter()
        .filter(|t| view.includes(t))
        .filter(|t| {
            needle
                .as_deref()
                .map_or(true, |n| t.title.to_lowercase().contains(n))
        })
        .collect();
    out.sort_by_key(|t| t.order.unwrap_or(u32::MAX));
    out
}

/// Kanban columns, in display order.
#[derive(Debug, Default)]
pub struct Board<'a> {
    pub in_progress: Vec<&'a Task>,
    pub todo: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> Board<'a> {
    pub fn columns(&self) -> [(Status, &[&'a Task]); 3] {
        [
            (Status::InProgress, self.in_progress.as_slice()),
            (Status::Pending, self.todo.as_slice()),
            (Status::Completed, self.done.as_slice()),
        ]
    }
}

pub fn group_by_status<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Board<'a> {
    let mut board = Board::default();
    for t in tasks {
        match t.status {
            Status::InProgress => board.in_progress.push(t),
            Status::Pending => board.todo.push(t),
            Status::Completed => board.done.push(t),
        }
    }
    board
}

/// Workout columns, in display order.
pub const FITNESS_COLUMNS: [Category; 5] = [
    Category::DailyWorkout,
    Category::Abs,
    Category::Glutes,
    Category::Snowboard,
    Category::Others,
];

/// Workouts grouped by category, with overall progress.
#[derive(Debug, Default)]
pub struct FitnessBoard<'a> {
    pub columns: Vec<(Category, Vec<&'a Task>)>,
    pub done: usize,
    pub total: usize,
}

impl FitnessBoard<'_> {
    /// Rounded percentage of workouts marked done.
    pub fn progress(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.done as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Groups fitness tasks into one column per workout category. Non-fitness
/// tasks are skipped.
pub fn group_by_category<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> FitnessBoard<'a> {
    let mut board = FitnessBoard {
        columns: FITNESS_COLUMNS.iter().map(|c| (c.clone(), Vec::new())).collect(),
        ..Default::default()
    };
    for t in tasks {
        let Some(category) = t.category.as_ref().filter(|c| c.is_fitness()) else {
            continue;
        };
        if let Some((_, column)) = board.columns.iter_mut().find(|(c, _)| *c == *category) {
            column.push(t);
        }
        board.total += 1;
        if t.status == Status::Completed {
            board.done += 1;
        }
    }
    board
}

/// Open tasks due exactly on `today`.
pub fn due_today(tasks: &[Task], today: NaiveDate) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.next_due == today && t.status != Status::Completed)
        .collect()
}
