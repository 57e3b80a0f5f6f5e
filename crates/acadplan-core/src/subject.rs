//! Subjects (courses) and their absence counters.
//!
//! `CourseLoad` and `AbsenceCount` replace loosely-typed optional numbers:
//! a subject either tracks a positive number of hours or it does not, and an
//! absence counter is always a non-negative integer.

use serde::{Deserialize, Serialize};

use crate::attendance::{compute_attendance_status, AttendanceStatus};
use crate::error::ValidationError;

/// Total scheduled hours for a subject over the term.
///
/// Zero, negative and non-finite inputs normalize to [`CourseLoad::NotTracked`],
/// so "unset" and "explicitly zero" are the same thing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum CourseLoad {
    /// No course load recorded; excluded from attendance reporting.
    #[default]
    NotTracked,
    /// Positive number of hours.
    Hours(f64),
}

impl CourseLoad {
    pub fn hours(hours: f64) -> Self {
        if hours.is_finite() && hours > 0.0 {
            CourseLoad::Hours(hours)
        } else {
            CourseLoad::NotTracked
        }
    }

    /// Hours if tracked.
    pub fn tracked_hours(&self) -> Option<f64> {
        match self {
            CourseLoad::Hours(h) => Some(*h),
            CourseLoad::NotTracked => None,
        }
    }

    pub fn is_tracked(&self) -> bool {
        matches!(self, CourseLoad::Hours(_))
    }
}

impl From<Option<f64>> for CourseLoad {
    fn from(value: Option<f64>) -> Self {
        value.map(CourseLoad::hours).unwrap_or_default()
    }
}

impl From<CourseLoad> for Option<f64> {
    fn from(value: CourseLoad) -> Self {
        value.tracked_hours()
    }
}

/// Count of missed class sessions.
///
/// Deserializes leniently: missing or `null` is 0, negative values clamp to 0
/// and fractional values are floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "u32")]
pub struct AbsenceCount(u32);

impl AbsenceCount {
    pub fn new(count: u32) -> Self {
        AbsenceCount(count)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// One more absence. Saturates at `u32::MAX`.
    pub fn increment(self) -> Self {
        AbsenceCount(self.0.saturating_add(1))
    }

    /// One fewer absence; stays at 0 when already 0.
    pub fn decrement(self) -> Self {
        AbsenceCount(self.0.saturating_sub(1))
    }
}

impl From<Option<f64>> for AbsenceCount {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(n) if n.is_finite() && n > 0.0 => {
                AbsenceCount(n.floor().min(u32::MAX as f64) as u32)
            }
            _ => AbsenceCount(0),
        }
    }
}

impl From<AbsenceCount> for u32 {
    fn from(value: AbsenceCount) -> Self {
        value.0
    }
}

impl std::fmt::Display for AbsenceCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A course the student is enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique identifier, immutable after creation
    pub id: String,
    /// Display label
    pub name: String,
    /// Color token used for grouping (opaque to the engines)
    pub color: String,
    #[serde(default)]
    pub course_load: CourseLoad,
    #[serde(default)]
    pub absences: AbsenceCount,
}

impl Subject {
    /// Create a new subject with a fresh id and no absences.
    ///
    /// # Errors
    /// Returns a validation error if `name` is blank.
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        course_load: CourseLoad,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty("name"));
        }
        Ok(Subject {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            color: color.into(),
            course_load,
            absences: AbsenceCount::default(),
        })
    }

    /// Attendance status, or `None` when the course load is not tracked.
    pub fn attendance_status(&self) -> Option<AttendanceStatus> {
        let hours = self.course_load.tracked_hours()?;
        compute_attendance_status(hours, self.absences.get())
    }
}
