//! Task management commands for CLI.

use acadplan_core::{Board, Command, Config, Task};
use chrono::Utc;
use clap::Subcommand;

use super::{open_planner, parse_due_date, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Subject ID the task belongs to
        #[arg(long)]
        subject: String,
        /// Due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, value_parser = parse_due_date)]
        due: chrono::DateTime<Utc>,
    },
    /// Edit a task
    Edit {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New subject ID
        #[arg(long)]
        subject: Option<String>,
        /// New due date
        #[arg(long, value_parser = parse_due_date)]
        due: Option<chrono::DateTime<Utc>>,
    },
    /// List tasks by due date
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Flip a task between pending and completed
    Toggle {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let planner = open_planner()?;

    match action {
        TaskAction::Add {
            title,
            subject,
            due,
        } => {
            if planner.find_subject(&subject)?.is_none() {
                return Err(format!("Subject not found: {subject}").into());
            }
            let task = Task::new(subject, title, due)?;
            planner.dispatch(Command::SaveTask(task.clone()))?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Edit {
            id,
            title,
            subject,
            due,
        } => {
            let mut task = planner
                .find_task(&id)?
                .ok_or(format!("Task not found: {id}"))?;

            if let Some(t) = title {
                let t = t.trim().to_string();
                if t.is_empty() {
                    return Err("task title must not be empty".into());
                }
                task.title = t;
            }
            if let Some(s) = subject {
                if planner.find_subject(&s)?.is_none() {
                    return Err(format!("Subject not found: {s}").into());
                }
                task.subject_id = s;
            }
            if let Some(d) = due {
                task.due_date = d;
            }

            planner.dispatch(Command::SaveTask(task.clone()))?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { json } => {
            let config = Config::load_or_default();
            let snapshot = planner.snapshot()?;
            let board = Board::build(&snapshot, Utc::now(), &config.display);
            if json {
                println!("{}", serde_json::to_string_pretty(&board.tasks)?);
            } else if board.tasks.is_empty() {
                println!("No tasks yet. Add one with `acadplan task add <title> --subject <id> --due <date>`.");
            } else {
                for card in &board.tasks {
                    println!(
                        "{}  {:<9}  {}  {}  [{}]",
                        card.task.id,
                        card.derived,
                        config.display.format_date(card.task.due_date),
                        card.task.title,
                        card.subject_label
                    );
                }
            }
        }
        TaskAction::Toggle { id } => {
            if planner.find_task(&id)?.is_none() {
                return Err(format!("Task not found: {id}").into());
            }
            let snapshot = planner.dispatch(Command::ToggleTaskStatus(id.clone()))?;
            let task = snapshot.task(&id).ok_or(format!("Task not found: {id}"))?;
            println!(
                "Task {}: {}",
                task.id,
                task.derived_status(Utc::now())
            );
        }
        TaskAction::Delete { id } => {
            if planner.find_task(&id)?.is_none() {
                return Err(format!("Task not found: {id}").into());
            }
            planner.dispatch(Command::DeleteTask(id.clone()))?;
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
