//! Absence tracking commands for CLI.

use acadplan_core::{attendance_report, Command, Config, Subject};
use clap::Subcommand;
use serde::Serialize;

use super::{open_planner, CliResult};

#[derive(Subcommand)]
pub enum AbsenceAction {
    /// Record one missed class
    Add {
        /// Subject ID
        subject_id: String,
    },
    /// Remove one recorded absence (no-op at zero)
    Remove {
        /// Subject ID
        subject_id: String,
    },
    /// Show absence risk for every subject with a course load
    Status {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct StatusRow<'a> {
    subject_id: &'a str,
    name: &'a str,
    absences: u32,
    #[serde(flatten)]
    status: acadplan_core::AttendanceStatus,
}

fn print_counter(subject: &Subject, decimals: usize) {
    match subject.attendance_status() {
        Some(status) => println!(
            "{}: {} absence(s), {} [{}], limit {}",
            subject.name,
            subject.absences,
            status.display_percentage(decimals),
            status.risk_level,
            status.max_allowed_absence_sessions
        ),
        None => println!(
            "{}: {} absence(s) (no course load set)",
            subject.name, subject.absences
        ),
    }
}

pub fn run(action: AbsenceAction) -> CliResult {
    let planner = open_planner()?;
    let config = Config::load_or_default();
    let decimals = config.display.decimals();

    match action {
        AbsenceAction::Add { subject_id } => {
            if planner.find_subject(&subject_id)?.is_none() {
                return Err(format!("Subject not found: {subject_id}").into());
            }
            let snapshot = planner.dispatch(Command::AddAbsence(subject_id.clone()))?;
            let subject = snapshot
                .subject(&subject_id)
                .ok_or(format!("Subject not found: {subject_id}"))?;
            print_counter(subject, decimals);
        }
        AbsenceAction::Remove { subject_id } => {
            if planner.find_subject(&subject_id)?.is_none() {
                return Err(format!("Subject not found: {subject_id}").into());
            }
            let snapshot = planner.dispatch(Command::RemoveAbsence(subject_id.clone()))?;
            let subject = snapshot
                .subject(&subject_id)
                .ok_or(format!("Subject not found: {subject_id}"))?;
            print_counter(subject, decimals);
        }
        AbsenceAction::Status { json } => {
            let snapshot = planner.snapshot()?;
            let report = attendance_report(&snapshot.subjects);
            if json {
                let rows: Vec<StatusRow> = report
                    .iter()
                    .map(|(subject, status)| StatusRow {
                        subject_id: &subject.id,
                        name: &subject.name,
                        absences: subject.absences.get(),
                        status: *status,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else if report.is_empty() {
                println!("No subjects with a course load. Set one with `acadplan subject edit <id> --course-load <hours>`.");
            } else {
                for (subject, _) in &report {
                    print_counter(subject, decimals);
                }
            }
        }
    }
    Ok(())
}
