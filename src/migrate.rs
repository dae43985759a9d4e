//! Load-time normalization of persisted task records.
//!
//! Older data files spell categories loosely ("Daily" for the daily workout,
//! lowercase labels) and may carry `isFitness` / `isGrocery` flags instead of
//! a category. Everything is converted to the canonical model here, once,
//! before tasks reach the lifecycle engine.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::models::{Category, Frequency, Priority, Status, Task};

/// A task record as found on disk. Lenient about optional and legacy fields.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StoredTask {
    pub id: String,
    pub title: String,
    pub status: Status,
    pub frequency: Frequency,
    pub priority: Priority,
    pub next_due: NaiveDate,
    #[serde(default)]
    pub last_completed: Option<NaiveDate>,
    #[serde(default)]
    pub streak: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub reps: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub is_home_workout: Option<bool>,
    #[serde(default)]
    pub is_fitness: Option<bool>,
    #[serde(default)]
    pub is_grocery: Option<bool>,
}

/// Label used for the daily workout before it was renamed.
const LEGACY_DAILY: &str = "Daily";

/// Converts one stored record into a canonical task.
///
/// The flag is true when the canonical form differs from what was stored,
/// i.e. the file should be rewritten.
pub fn normalize(stored: StoredTask) -> (Task, bool) {
    let mut changed = false;

    let mut category = stored.category.map(|raw| {
        let canonical = canonical_category(&raw);
        if canonical.label() != raw {
            changed = true;
        }
        canonical
    });

    if stored.is_fitness.is_some() || stored.is_grocery.is_some() {
        changed = true;
        if category.is_none() {
            if stored.is_grocery == Some(true) {
                category = Some(Category::Grocery);
            } else if stored.is_fitness == Some(true) {
                category = Some(Category::Others);
            }
        }
    }

    let streak = stored.streak.unwrap_or_else(|| {
        changed = true;
        0
    });

    let task = Task {
        id: stored.id,
        title: stored.title,
        status: stored.status,
        frequency: stored.frequency,
        priority: stored.priority,
        next_due: stored.next_due,
        last_completed: stored.last_completed,
        streak,
        category,
        order: stored.order,
        reps: stored.reps,
        video_url: stored.video_url,
        is_home_workout: stored.is_home_workout.unwrap_or(false),
    };
    if changed {
        debug!(id = %task.id, "normalized legacy task record");
    }
    (task, changed)
}

/// Normalizes a whole list, returning the tasks and how many were rewritten.
pub fn normalize_all(stored: Vec<StoredTask>) -> (Vec<Task>, usize) {
    let mut migrated = 0;
    let tasks = stored
        .into_iter()
        .map(|s| {
            let (task, changed) = normalize(s);
            if changed {
                migrated += 1;
            }
            task
        })
        .collect();
    (tasks, migrated)
}

fn canonical_category(raw: &str) -> Category {
    if raw == LEGACY_DAILY {
        return Category::DailyWorkout;
    }
    match Category::from(raw.to_string()) {
        Category::Custom(_) => raw
            .parse()
            .unwrap_or_else(|_| Category::Custom(raw.to_string())),
        known => known,
    }
}
