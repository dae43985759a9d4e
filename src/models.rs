use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::FocusError;

/// Workflow state of a task. Only entering `Completed` has scheduling effects.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    #[serde(rename = "To Do", alias = "Pending", alias = "Todo")]
    Pending,
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    #[serde(rename = "Done", alias = "Completed")]
    Completed,
}

/// Recurrence rule applied to a task's `next_due` after each completion.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekdays,
    Weekly,
    Biweekly,
    Monthly,
    Once,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Grouping tag. Fitness sub-types and the grocery marker are known variants;
/// anything else is kept verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Abs,
    Glutes,
    Snowboard,
    DailyWorkout,
    Others,
    Grocery,
    Custom(String),
}

/// Represents a single task in Focus Space.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique identifier, never changed after creation.
    pub id: String,
    pub title: String,
    pub status: Status,
    pub frequency: Frequency,
    pub priority: Priority,
    /// Local calendar day the task is next expected to be actioned.
    pub next_due: NaiveDate,
    /// Day of the most recent completion.
    pub last_completed: Option<NaiveDate>,
    /// Count of distinct completion days.
    pub streak: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Manual position, independent of scheduling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
    /// Workout volume, e.g. "3x12" or "30 mins".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_home_workout: bool,
}

/// Fields supplied when creating a task. Id, streak and last completion are
/// owned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub status: Status,
    pub frequency: Frequency,
    pub priority: Priority,
    pub next_due: NaiveDate,
    pub category: Option<Category>,
    pub reps: Option<String>,
    pub video_url: Option<String>,
    pub is_home_workout: bool,
}

/// Direct field edits. `None` leaves the field untouched; for optional task
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub frequency: Option<Frequency>,
    pub priority: Option<Priority>,
    pub next_due: Option<NaiveDate>,
    pub last_completed: Option<Option<NaiveDate>>,
    pub category: Option<Option<Category>>,
    pub reps: Option<Option<String>>,
    pub video_url: Option<Option<String>>,
    pub is_home_workout: Option<bool>,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::Pending => "To Do",
            Status::InProgress => "In Progress",
            Status::Completed => "Done",
        }
    }
}

impl Frequency {
    /// `Once` is the only rule that never advances.
    pub fn is_recurring(self) -> bool {
        self != Frequency::Once
    }

    pub fn label(self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekdays => "Weekdays",
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Once => "Once",
        }
    }
}

impl Priority {
    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl Category {
    pub const KNOWN: [Category; 6] = [
        Category::Abs,
        Category::Glutes,
        Category::Snowboard,
        Category::DailyWorkout,
        Category::Others,
        Category::Grocery,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::Abs => "Abs",
            Category::Glutes => "Glutes",
            Category::Snowboard => "Snowboard",
            Category::DailyWorkout => "Daily Workout",
            Category::Others => "Others",
            Category::Grocery => "Grocery",
            Category::Custom(s) => s,
        }
    }

    pub fn is_fitness(&self) -> bool {
        matches!(
            self,
            Category::Abs
                | Category::Glutes
                | Category::Snowboard
                | Category::DailyWorkout
                | Category::Others
        )
    }

    pub fn is_grocery(&self) -> bool {
        *self == Category::Grocery
    }
}

impl From<String> for Category {
    /// Exact label match only; legacy spellings are handled by `migrate`.
    fn from(s: String) -> Self {
        Category::KNOWN
            .into_iter()
            .find(|c| c.label() == s)
            .unwrap_or(Category::Custom(s))
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        match c {
            Category::Custom(s) => s,
            known => known.label().to_string(),
        }
    }
}

impl Task {
    pub fn is_fitness(&self) -> bool {
        self.category.as_ref().is_some_and(Category::is_fitness)
    }

    pub fn is_grocery(&self) -> bool {
        self.category.as_ref().is_some_and(Category::is_grocery)
    }
}

impl NewTask {
    /// A one-off, medium priority, pending task due on `next_due`.
    pub fn new(title: impl Into<String>, next_due: NaiveDate) -> Self {
        NewTask {
            title: title.into(),
            status: Status::Pending,
            frequency: Frequency::Once,
            priority: Priority::Medium,
            next_due,
            category: None,
            reps: None,
            video_url: None,
            is_home_workout: false,
        }
    }

    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercases and strips separators so "In Progress", "in-progress" and
/// "inprogress" compare equal.
pub(crate) fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for Status {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "todo" | "pending" => Ok(Status::Pending),
            "inprogress" | "doing" => Ok(Status::InProgress),
            "done" | "completed" | "complete" => Ok(Status::Completed),
            _ => Err(FocusError::InvalidValue {
                field: "status",
                input: s.to_string(),
                expected: "todo, in-progress, done",
            }),
        }
    }
}

impl FromStr for Frequency {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekdays" | "weekday" => Ok(Frequency::Weekdays),
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            "once" => Ok(Frequency::Once),
            _ => Err(FocusError::InvalidValue {
                field: "frequency",
                input: s.to_string(),
                expected: "daily, weekdays, weekly, biweekly, monthly, once",
            }),
        }
    }
}

impl FromStr for Priority {
    type Err = FocusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match squash(s).as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(FocusError::InvalidValue {
                field: "priority",
                input: s.to_string(),
                expected: "high, medium, low",
            }),
        }
    }
}

impl FromStr for Category {
    type Err = FocusError;

    /// Case-insensitive match on known labels; anything else becomes `Custom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = squash(s);
        Ok(Category::KNOWN
            .into_iter()
            .find(|c| squash(c.label()) == key)
            .unwrap_or_else(|| Category::Custom(s.trim().to_string())))
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(input: &str) -> crate::error::Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| FocusError::InvalidDate {
        input: input.to_string(),
    })
}
