//! Read-only view of a snapshot, ready for rendering.
//!
//! The board resolves each task's subject for labelling. A task whose subject
//! is gone gets the configured fallback label and color instead.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use crate::attendance::AttendanceStatus;
use crate::commands::Snapshot;
use crate::storage::DisplayConfig;
use crate::subject::Subject;
use crate::task::{order_tasks, DerivedStatus, Task};

/// Absence counter card for one subject with a tracked course load.
#[derive(Debug, Clone, Serialize)]
pub struct AbsenceCard<'a> {
    pub subject_id: &'a str,
    pub name: &'a str,
    pub color: &'a str,
    pub absences: u32,
    /// Whether removing an absence would change anything
    pub can_remove: bool,
    pub status: AttendanceStatus,
}

/// One task in due-date order with its resolved subject.
#[derive(Debug, Clone, Serialize)]
pub struct TaskCard<'a> {
    pub task: &'a Task,
    pub subject_label: &'a str,
    pub subject_color: &'a str,
    /// False when the subject could not be found
    pub has_subject: bool,
    pub derived: DerivedStatus,
}

/// Everything the presentation layer shows for a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Board<'a> {
    pub generated_at: DateTime<Utc>,
    pub subjects: &'a [Subject],
    pub attendance: Vec<AbsenceCard<'a>>,
    pub tasks: Vec<TaskCard<'a>>,
}

impl<'a> Board<'a> {
    pub fn build(snapshot: &'a Snapshot, now: DateTime<Utc>, display: &'a DisplayConfig) -> Self {
        let by_id: HashMap<&str, &Subject> = snapshot
            .subjects
            .iter()
            .map(|s| (s.id.as_str(), s))
            .collect();

        let attendance = snapshot
            .subjects
            .iter()
            .filter_map(|subject| {
                let status = subject.attendance_status()?;
                Some(AbsenceCard {
                    subject_id: &subject.id,
                    name: &subject.name,
                    color: &subject.color,
                    absences: subject.absences.get(),
                    can_remove: subject.absences.get() > 0,
                    status,
                })
            })
            .collect();

        let tasks = order_tasks(&snapshot.tasks, now)
            .into_iter()
            .map(|ordered| {
                let subject = by_id.get(ordered.task.subject_id.as_str()).copied();
                TaskCard {
                    task: ordered.task,
                    subject_label: subject
                        .map(|s| s.name.as_str())
                        .unwrap_or(display.fallback_subject_label.as_str()),
                    subject_color: subject
                        .map(|s| s.color.as_str())
                        .unwrap_or(display.fallback_color.as_str()),
                    has_subject: subject.is_some(),
                    derived: ordered.derived,
                }
            })
            .collect();

        tracing::debug!(
            subjects = snapshot.subjects.len(),
            tasks = snapshot.tasks.len(),
            "built board"
        );

        Board {
            generated_at: now,
            subjects: &snapshot.subjects,
            attendance,
            tasks,
        }
    }

    /// Number of tasks that are overdue right now.
    pub fn overdue_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|card| card.derived == DerivedStatus::Overdue)
            .count()
    }
}
