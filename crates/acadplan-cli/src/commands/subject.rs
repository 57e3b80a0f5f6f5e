//! Subject management commands for CLI.

use acadplan_core::{Command, Config, CourseLoad, Subject};
use clap::Subcommand;

use super::{open_planner, CliResult};

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Create a new subject
    Add {
        /// Subject name
        name: String,
        /// Color token (defaults to subjects.default_color)
        #[arg(long)]
        color: Option<String>,
        /// Total course load in hours; enables absence tracking
        #[arg(long)]
        course_load: Option<f64>,
    },
    /// Edit a subject
    Edit {
        /// Subject ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New color
        #[arg(long)]
        color: Option<String>,
        /// New course load in hours
        #[arg(long, conflicts_with = "clear_course_load")]
        course_load: Option<f64>,
        /// Stop tracking absences for this subject
        #[arg(long)]
        clear_course_load: bool,
    },
    /// List subjects
    List {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Delete a subject and all of its tasks
    Delete {
        /// Subject ID
        id: String,
    },
}

pub fn run(action: SubjectAction) -> CliResult {
    let planner = open_planner()?;

    match action {
        SubjectAction::Add {
            name,
            color,
            course_load,
        } => {
            let color = color.unwrap_or_else(|| Config::load_or_default().subjects.default_color);
            let load = course_load.map(CourseLoad::hours).unwrap_or_default();
            let subject = Subject::new(name, color, load)?;
            planner.dispatch(Command::SaveSubject(subject.clone()))?;
            println!("Subject created: {}", subject.id);
            println!("{}", serde_json::to_string_pretty(&subject)?);
        }
        SubjectAction::Edit {
            id,
            name,
            color,
            course_load,
            clear_course_load,
        } => {
            let mut subject = planner
                .find_subject(&id)?
                .ok_or(format!("Subject not found: {id}"))?;

            if let Some(n) = name {
                let n = n.trim().to_string();
                if n.is_empty() {
                    return Err("subject name must not be empty".into());
                }
                subject.name = n;
            }
            if let Some(c) = color {
                subject.color = c;
            }
            if let Some(h) = course_load {
                subject.course_load = CourseLoad::hours(h);
            }
            if clear_course_load {
                subject.course_load = CourseLoad::NotTracked;
            }

            planner.dispatch(Command::SaveSubject(subject.clone()))?;
            println!("Subject updated:");
            println!("{}", serde_json::to_string_pretty(&subject)?);
        }
        SubjectAction::List { json } => {
            let snapshot = planner.snapshot()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.subjects)?);
            } else if snapshot.subjects.is_empty() {
                println!("No subjects yet. Add one with `acadplan subject add <name>`.");
            } else {
                for subject in &snapshot.subjects {
                    let load = match subject.course_load.tracked_hours() {
                        Some(h) => format!("{h} h"),
                        None => "no course load".to_string(),
                    };
                    println!("{}  {}  ({}, {})", subject.id, subject.name, subject.color, load);
                }
            }
        }
        SubjectAction::Delete { id } => {
            let snapshot = planner.snapshot()?;
            if snapshot.subject(&id).is_none() {
                return Err(format!("Subject not found: {id}").into());
            }
            let removed_tasks = snapshot.tasks_for_subject(&id).count();
            planner.dispatch(Command::DeleteSubject(id.clone()))?;
            println!("Subject deleted: {id} ({removed_tasks} task(s) removed)");
        }
    }
    Ok(())
}
