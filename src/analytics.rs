use chrono::{Days, NaiveDate};

use crate::models::{Status, Task};
use crate::views::due_today;

/// Length of the consistency heatmap, in days.
pub const HEATMAP_DAYS: u64 = 30;
const TOP_STREAKS: usize = 5;

/// One heatmap cell: completions recorded on `date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayActivity {
    pub date: NaiveDate,
    pub count: usize,
}

impl DayActivity {
    /// Shade bucket from 0 (nothing) to 4 (more than six completions).
    pub fn intensity(&self) -> u8 {
        match self.count {
            0 => 0,
            1..=2 => 1,
            3..=4 => 2,
            5..=6 => 3,
            _ => 4,
        }
    }
}

/// Completions on one day of the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: usize,
    /// Completions of fitness tasks only.
    pub fitness: usize,
}

/// Per-day completion counts for the `days` days ending with `today`,
/// oldest first.
pub fn trend(tasks: &[Task], today: NaiveDate, days: u64) -> Vec<TrendPoint> {
    (0..days)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|date| {
            let done: Vec<&Task> = tasks.iter().filter(|t| t.last_completed == Some(date)).collect();
            TrendPoint {
                date,
                total: done.len(),
                fitness: done.iter().filter(|t| t.is_fitness()).count(),
            }
        })
        .collect()
}

/// Summary numbers for the analytics view.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub completed_today: usize,
    pub fitness_completed_today: usize,
    pub due_today: usize,
    pub total: usize,
    pub completed: usize,
    /// Rounded percentage of tasks currently marked done.
    pub completion_rate: u32,
    pub best_streak: u32,
    /// (title, streak) for the longest positive streaks, longest first.
    pub top_streaks: Vec<(String, u32)>,
    /// Oldest day first, ending with `today`.
    pub heatmap: Vec<DayActivity>,
}

impl Dashboard {
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        let done_on = |day: NaiveDate| {
            tasks
                .iter()
                .filter(move |t| t.last_completed == Some(day))
        };

        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.status == Status::Completed).count();
        let completion_rate = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        let mut streaks: Vec<&Task> = tasks.iter().filter(|t| t.streak > 0).collect();
        streaks.sort_by(|a, b| b.streak.cmp(&a.streak));
        let top_streaks = streaks
            .into_iter()
            .take(TOP_STREAKS)
            .map(|t| (t.title.clone(), t.streak))
            .collect();

        let heatmap = (0..HEATMAP_DAYS)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| DayActivity {
                date,
                count: done_on(date).count(),
            })
            .collect();

        Dashboard {
            completed_today: done_on(today).count(),
            fitness_completed_today: done_on(today).filter(|t| t.is_fitness()).count(),
            due_today: due_today(tasks, today).len(),
            total,
            completed,
            completion_rate,
            best_streak: tasks.iter().map(|t| t.streak).max().unwrap_or(0),
            top_streaks,
            heatmap,
        }
    }
}
