//! # Focus Space
//!
//! A personal task and habit tracker: a to-do list, a kanban board, workout
//! and grocery lists, and an analytics summary, all backed by one JSON file.
//!
//! The interesting part is the scheduling engine for recurring tasks:
//!
//! * [`recurrence::compute_next_due`] maps a rule (`Daily`, `Weekdays`,
//!   `Weekly`, `Biweekly`, `Monthly`, `Once`) and a date to the next due date.
//! * [`lifecycle`] owns completion (streak and due-date advance) and the
//!   startup reset that returns finished recurring tasks to "To Do" once
//!   their day comes round again.
//! * [`store::TaskStore`] is the single owner of the task list; every change
//!   goes through it and is saved straight away.
//!
//! ```
//! use chrono::NaiveDate;
//! use focus_space::models::Frequency;
//! use focus_space::recurrence::compute_next_due;
//!
//! let friday = NaiveDate::from_ymd_opt(2024, 3, 8).unwrap();
//! let monday = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
//! assert_eq!(compute_next_due(Frequency::Weekdays, friday), monday);
//! ```

pub mod analytics;
pub mod assistant;
pub mod commands;
pub mod error;
pub mod lifecycle;
pub mod migrate;
pub mod models;
pub mod recurrence;
pub mod storage;
pub mod store;
pub mod views;

pub use error::{FocusError, Result};
