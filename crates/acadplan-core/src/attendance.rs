//! Attendance risk engine.
//!
//! Converts a subject's course load (hours) and absence count (50-minute
//! sessions) into the share of the term already missed, the absence budget,
//! and a three-level risk classification against the 25% cutoff.
//!
//! All functions here are pure.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::subject::Subject;

/// Minutes in one hour of course load.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Length of one class session; one absence costs this many minutes.
pub const SESSION_LENGTH_MINUTES: f64 = 50.0;

/// Share of the course load that may be missed.
pub const MAX_ABSENCE_RATIO: f64 = 0.25;

/// Percentage at or above which a subject is in danger.
pub const DANGER_THRESHOLD: f64 = 25.0;

/// Percentage at or above which a subject needs attention.
pub const WARNING_THRESHOLD: f64 = 20.0;

/// Risk classification of an absence percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Danger,
}

impl RiskLevel {
    /// Classify a raw percentage. First match wins: danger, warning, safe.
    pub fn classify(percentage: f64) -> Self {
        if percentage >= DANGER_THRESHOLD {
            RiskLevel::Danger
        } else if percentage >= WARNING_THRESHOLD {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Warning => "warning",
            RiskLevel::Danger => "danger",
        };
        f.pad(s)
    }
}

/// Computed attendance figures for one subject.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceStatus {
    /// Absence minutes as a share of course minutes, 0..=inf, unrounded
    pub percentage: f64,
    /// Whole sessions that fit in the 25% allowance
    pub max_allowed_absence_sessions: u32,
    /// Sessions left before the allowance is used up (0 once exceeded)
    pub remaining_absence_sessions: u32,
    pub risk_level: RiskLevel,
}

impl AttendanceStatus {
    /// Percentage clamped to 100, for progress bars.
    pub fn progress(&self) -> f64 {
        self.percentage.min(100.0)
    }

    /// Percentage rounded for display, e.g. `6.9%`.
    pub fn display_percentage(&self, decimals: usize) -> String {
        format!("{:.*}%", decimals, self.percentage)
    }
}

/// Compute the attendance status for a course load and absence count.
///
/// Returns `None` when `course_load_hours` is zero, negative or not finite;
/// such subjects are not part of attendance reporting.
pub fn compute_attendance_status(
    course_load_hours: f64,
    absence_count: u32,
) -> Option<AttendanceStatus> {
    if !course_load_hours.is_finite() || course_load_hours <= 0.0 {
        return None;
    }

    let total_minutes = course_load_hours * MINUTES_PER_HOUR;
    let absence_minutes = f64::from(absence_count) * SESSION_LENGTH_MINUTES;
    let percentage = if total_minutes > 0.0 {
        (absence_minutes / total_minutes) * 100.0
    } else {
        0.0
    };

    let max_minutes = total_minutes * MAX_ABSENCE_RATIO;
    // Partial sessions do not count towards the allowance.
    let max_sessions = (max_minutes / SESSION_LENGTH_MINUTES).floor();
    let max_allowed_absence_sessions = if max_sessions >= u32::MAX as f64 {
        u32::MAX
    } else {
        max_sessions as u32
    };

    Some(AttendanceStatus {
        percentage,
        max_allowed_absence_sessions,
        remaining_absence_sessions: max_allowed_absence_sessions.saturating_sub(absence_count),
        risk_level: RiskLevel::classify(percentage),
    })
}

/// Attendance status of every subject with a tracked course load, in input order.
pub fn attendance_report(subjects: &[Subject]) -> Vec<(&Subject, AttendanceStatus)> {
    subjects
        .iter()
        .filter_map(|subject| subject.attendance_status().map(|status| (subject, status)))
        .collect()
}
