//! # Focus
//!
//! Command-line front end for Focus Space, a personal task and habit tracker.
//!
//! ## Features
//!
//! *   **Recurring tasks**: daily, weekday-only, weekly, biweekly and monthly
//!     tasks come back as "To Do" once their next due day arrives.
//! *   **Streaks**: completing a task bumps its streak at most once per day.
//! *   **Lists**: everyday tasks, a kanban board by status, workouts and groceries.
//! *   **Analytics**: completion rate, top streaks and a 30-day consistency strip.
//! *   **Assistant hooks**: feed in structured parser output or assistant
//!     function calls as JSON.
//!
//! ## Usage
//!
//! ```bash
//! # Everyday list (default)
//! focus list
//! focus list --view fitness --all
//!
//! # Add a recurring task
//! focus add "Stretch" --frequency weekdays --priority high
//!
//! # Complete it (ids can be shortened to any unique prefix)
//! focus done 3f2a
//!
//! # Kanban board and dashboard
//! focus board
//! focus board --fitness
//! focus stats --days 30
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved in your local data directory:
//! *   Linux: `~/.local/share/focus-space/tasks.json`
//! *   macOS: `~/Library/Application Support/focus-space/tasks.json`
//! *   Windows: `%APPDATA%\focus-space\tasks.json`
//!
//! Override with `--db` or the `FOCUS_DB` environment variable. `--today`
//! (`FOCUS_TODAY`) pins the calendar day used for scheduling.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};

use focus_space::commands::*;
use focus_space::models::{parse_date, Category, Frequency, NewTask, Priority, Status, TaskEdit};
use focus_space::storage::{default_db_path, JsonFileRepository};
use focus_space::store::TaskStore;
use focus_space::views::View;

#[derive(Parser)]
#[command(name = "focus", version)]
#[command(about = "Personal task and habit tracker with recurring tasks and streaks", long_about = None)]
struct Cli {
    /// Path to the tasks file
    #[arg(long, global = true, env = "FOCUS_DB")]
    db: Option<PathBuf>,

    /// Treat this day (YYYY-MM-DD) as today
    #[arg(long, global = true, env = "FOCUS_TODAY")]
    today: Option<String>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task title (quoted if it has spaces)
        title: String,
        /// Repeat rule (daily, weekdays, weekly, biweekly, monthly, once)
        #[arg(short, long, default_value = "once")]
        frequency: Frequency,
        /// Priority (high, medium, low)
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
        /// Due date in YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        due: Option<String>,
        /// Category, e.g. "Grocery", "Abs", "Daily Workout"
        #[arg(short, long)]
        category: Option<Category>,
        /// Starting status (todo, in-progress, done)
        #[arg(short, long, default_value = "todo")]
        status: Status,
        /// Workout volume, e.g. "3x12"
        #[arg(long)]
        reps: Option<String>,
        /// Tutorial link
        #[arg(long)]
        video: Option<String>,
        /// Can be done at home
        #[arg(long)]
        home: bool,
    },
    /// List tasks in manual order
    List {
        /// Which list to show (all, grocery, status, fitness, analytics)
        #[arg(long, default_value = "all")]
        view: View,
        /// Only titles containing this text
        #[arg(short, long)]
        search: Option<String>,
        /// Show completed tasks
        #[arg(short, long)]
        all: bool,
    },
    /// Show the kanban board
    Board {
        /// Only titles containing this text
        #[arg(short, long)]
        search: Option<String>,
        /// Show workouts by category instead of tasks by status
        #[arg(long)]
        fitness: bool,
    },
    /// Mark a task as done
    Done {
        id: String,
    },
    /// Change a task's status
    Status {
        id: String,
        /// todo, in-progress or done
        status: Status,
    },
    /// Edit a task
    Edit {
        id: String,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New repeat rule
        #[arg(short, long)]
        frequency: Option<Frequency>,
        /// New priority
        #[arg(short, long)]
        priority: Option<Priority>,
        /// New due date
        #[arg(short, long)]
        due: Option<String>,
        /// Day it was last done (YYYY-MM-DD)
        #[arg(long)]
        last_completed: Option<String>,
        /// Forget when it was last done
        #[arg(long, conflicts_with = "last_completed")]
        clear_last_completed: bool,
        /// New category (moves a workout to another column)
        #[arg(short, long)]
        category: Option<Category>,
        /// Remove the category
        #[arg(long, conflicts_with = "category")]
        clear_category: bool,
        /// New workout volume
        #[arg(long)]
        reps: Option<String>,
        /// Remove the workout volume
        #[arg(long, conflicts_with = "reps")]
        clear_reps: bool,
        /// New tutorial link
        #[arg(long)]
        video: Option<String>,
        /// Remove the tutorial link
        #[arg(long, conflicts_with = "video")]
        clear_video: bool,
        /// Whether it can be done at home
        #[arg(long)]
        home: Option<bool>,
    },
    /// Remove a task
    Remove {
        id: String,
    },
    /// Move a task to a position in manual order (0 is first)
    Move {
        id: String,
        position: usize,
    },
    /// Restore the default manual order
    ResetOrder,
    /// Show the analytics dashboard
    Stats {
        /// Days covered by the completion trend
        #[arg(long, default_value_t = 7)]
        days: u64,
    },
    /// Add a task from a natural-language parser response (JSON)
    Parse {
        response: String,
    },
    /// Run a voice assistant function call (JSON) and print the reply
    Assist {
        call: String,
    },
    /// Reset the database (delete all tasks)
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: Shell,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "focus_space=debug,info"
    } else {
        "warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "focus", &mut io::stdout());
        return Ok(());
    }

    let today = match cli.today.as_deref() {
        Some(s) => parse_date(s)?,
        None => Local::now().date_naive(),
    };
    let path = cli.db.unwrap_or_else(default_db_path);
    let (mut store, _report) = TaskStore::open(JsonFileRepository::new(path), today);

    match cli.command {
        Some(Commands::Add { title, frequency, priority, due, category, status, reps, video, home }) => {
            let next_due = resolve_due(due.as_deref(), today)?;
            let new = NewTask {
                title,
                status,
                frequency,
                priority,
                next_due,
                category,
                reps,
                video_url: video,
                is_home_workout: home,
            };
            cmd_add(&mut store, new, false);
        }
        Some(Commands::List { view, search, all }) => cmd_list(&store, view, search.as_deref(), all, today),
        Some(Commands::Board { search, fitness: true }) => cmd_fitness_board(&store, search.as_deref()),
        Some(Commands::Board { search, fitness: false }) => cmd_board(&store, search.as_deref()),
        Some(Commands::Done { id }) => cmd_complete(&mut store, &id, today, false)?,
        Some(Commands::Status { id, status }) => cmd_status(&mut store, &id, status, today, false)?,
        Some(Commands::Edit {
            id,
            title,
            frequency,
            priority,
            due,
            last_completed,
            clear_last_completed,
            category,
            clear_category,
            reps,
            clear_reps,
            video,
            clear_video,
            home,
        }) => {
            let next_due = due.as_deref().map(parse_date).transpose()?;
            let last_completed = last_completed.as_deref().map(parse_date).transpose()?;
            let edit = TaskEdit {
                title,
                frequency,
                priority,
                next_due,
                last_completed: clearable(last_completed, clear_last_completed),
                category: clearable(category, clear_category),
                reps: clearable(reps, clear_reps),
                video_url: clearable(video, clear_video),
                is_home_workout: home,
            };
            cmd_edit(&mut store, &id, edit, false)?;
        }
        Some(Commands::Remove { id }) => cmd_remove(&mut store, &id, false)?,
        Some(Commands::Move { id, position }) => cmd_move(&mut store, &id, position, false)?,
        Some(Commands::ResetOrder) => cmd_reset_order(&mut store, false),
        Some(Commands::Stats { days }) => cmd_stats(&store, today, days),
        Some(Commands::Parse { response }) => {
            if cmd_parse(&mut store, &response, false).is_none() {
                std::process::exit(1);
            }
        }
        Some(Commands::Assist { call }) => {
            cmd_assist(&mut store, &call, today).context("Invalid assistant call")?
        }
        Some(Commands::Reset { force }) => cmd_reset(&mut store, force)?,
        Some(Commands::Completions { .. }) => {}
        None => cmd_list(&store, View::AllTasks, None, false, today),
    }
    Ok(())
}

/// `--clear-*` wins over a value; neither leaves the field untouched.
fn clearable<T>(value: Option<T>, clear: bool) -> Option<Option<T>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

fn resolve_due(due: Option<&str>, today: NaiveDate) -> focus_space::Result<NaiveDate> {
    due.map(parse_date).transpose().map(|d| d.unwrap_or(today))
}
