//! Course tasks (assignments, exams) and their status.
//!
//! A task has exactly one persisted status field and one derived view of it:
//!
//!   stored:   PENDING <──── toggle ────> COMPLETED
//!
//!   derived:  COMPLETED  if stored == COMPLETED
//!             OVERDUE    if stored == PENDING and due_date < now
//!             PENDING    otherwise
//!
//! `Overdue` only exists at read time and is never written back.

pub mod ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

pub use ordering::{order_tasks, sort_by_due_date, OrderedTask};

/// Persisted task status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// The other stored status. Applying it twice is the identity.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

/// Effective status of a task at a point in time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DerivedStatus {
    Pending,
    Completed,
    Overdue,
}

impl fmt::Display for DerivedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DerivedStatus::Pending => "pending",
            DerivedStatus::Completed => "completed",
            DerivedStatus::Overdue => "overdue",
        };
        f.pad(s)
    }
}

/// An assignment, exam or other dated item belonging to a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,
    /// Owning subject; may point at a subject that no longer exists
    pub subject_id: String,
    pub title: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Create a new pending task.
    ///
    /// # Errors
    /// Returns a validation error if `title` is blank.
    pub fn new(
        subject_id: impl Into<String>,
        title: impl Into<String>,
        due_date: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::empty("title"));
        }
        Ok(Task {
            id: uuid::Uuid::new_v4().to_string(),
            subject_id: subject_id.into(),
            title,
            due_date,
            status: TaskStatus::Pending,
        })
    }

    /// Flip the stored status between pending and completed.
    pub fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    pub fn derived_status(&self, now: DateTime<Utc>) -> DerivedStatus {
        derive_status(self, now)
    }
}

/// Effective status of `task` at `now`.
///
/// Completed wins over everything; a pending task whose due date is strictly
/// before `now` is overdue.
pub fn derive_status(task: &Task, now: DateTime<Utc>) -> DerivedStatus {
    match task.status {
        TaskStatus::Completed => DerivedStatus::Completed,
        TaskStatus::Pending if task.due_date < now => DerivedStatus::Overdue,
        TaskStatus::Pending => DerivedStatus::Pending,
    }
}
