//! Dashboard command: subjects, absence risk and tasks in one view.

use acadplan_core::{Board, Config};
use chrono::Utc;

use super::{open_planner, CliResult};

pub fn run(json: bool) -> CliResult {
    let planner = open_planner()?;
    let config = Config::load_or_default();
    let snapshot = planner.snapshot()?;
    let board = Board::build(&snapshot, Utc::now(), &config.display);

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
        return Ok(());
    }

    let decimals = config.display.decimals();

    println!("Subjects");
    if board.subjects.is_empty() {
        println!("  (none)");
    }
    for subject in board.subjects {
        println!("  {} {}", subject.color, subject.name);
    }

    println!();
    println!("Absences");
    if board.attendance.is_empty() {
        println!("  (no subject has a course load)");
    }
    for card in &board.attendance {
        println!(
            "  {:<24} {:>3} absence(s)  {:>7}  {:<7}  limit {}",
            card.name,
            card.absences,
            card.status.display_percentage(decimals),
            card.status.risk_level,
            card.status.max_allowed_absence_sessions
        );
    }

    println!();
    println!("Tasks ({} overdue)", board.overdue_count());
    if board.tasks.is_empty() {
        println!("  (none)");
    }
    for card in &board.tasks {
        println!(
            "  {:<9}  {}  {}  [{}]",
            card.derived,
            config.display.format_date(card.task.due_date),
            card.task.title,
            card.subject_label
        );
    }
    Ok(())
}
