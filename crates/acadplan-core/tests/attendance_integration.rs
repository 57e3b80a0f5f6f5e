//! Integration tests for the attendance risk engine.
//!
//! Covers the documented scenarios plus property checks over the formula,
//! the allowance rounding and the risk thresholds.

use acadplan_core::{
    attendance_report, compute_attendance_status, AbsenceCount, CourseLoad, RiskLevel, Subject,
};
use proptest::prelude::*;

#[test]
fn sixty_hour_course_scenarios() {
    let five = compute_attendance_status(60.0, 5).unwrap();
    assert!((five.percentage - 6.94).abs() < 0.01);
    assert_eq!(five.risk_level, RiskLevel::Safe);
    assert_eq!(five.max_allowed_absence_sessions, 18);

    let eighteen = compute_attendance_status(60.0, 18).unwrap();
    assert_eq!(eighteen.percentage, 25.0);
    assert_eq!(eighteen.risk_level, RiskLevel::Danger);
}

#[test]
fn walking_absences_up_crosses_each_band_once() {
    let mut subject = Subject::new("Chemistry", "#0ea5e9", CourseLoad::hours(50.0)).unwrap();
    let mut seen = Vec::new();
    for _ in 0..20 {
        let level = subject.attendance_status().unwrap().risk_level;
        if seen.last() != Some(&level) {
            seen.push(level);
        }
        subject.absences = subject.absences.increment();
    }
    assert_eq!(seen, vec![RiskLevel::Safe, RiskLevel::Warning, RiskLevel::Danger]);

    // 50 h: warning starts at 12 absences (20%), danger at 15 (25%)
    subject.absences = AbsenceCount::new(11);
    assert_eq!(subject.attendance_status().unwrap().risk_level, RiskLevel::Safe);
    subject.absences = AbsenceCount::new(12);
    assert_eq!(subject.attendance_status().unwrap().risk_level, RiskLevel::Warning);
    subject.absences = AbsenceCount::new(15);
    assert_eq!(subject.attendance_status().unwrap().risk_level, RiskLevel::Danger);
}

#[test]
fn report_excludes_zero_and_unset_course_load() {
    let subjects: Vec<Subject> = serde_json::from_str(
        r##"[
            {"id":"a","name":"Unset","color":"#111"},
            {"id":"b","name":"Zero","color":"#222","course_load":0,"absences":4},
            {"id":"c","name":"Negative","color":"#333","course_load":-8},
            {"id":"d","name":"Tracked","color":"#444","course_load":72,"absences":3}
        ]"##,
    )
    .unwrap();

    let report = attendance_report(&subjects);
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].0.name, "Tracked");
    assert_eq!(report[0].1.max_allowed_absence_sessions, 21);
}

proptest! {
    #[test]
    fn percentage_matches_formula(hours in 0.5f64..500.0, absences in 0u32..400) {
        let status = compute_attendance_status(hours, absences).unwrap();
        let expected = (f64::from(absences) * 50.0) / (hours * 60.0) * 100.0;
        prop_assert_eq!(status.percentage, expected);
        prop_assert!(status.percentage >= 0.0);
    }

    #[test]
    fn percentage_is_monotone_in_absences(hours in 0.5f64..500.0, absences in 0u32..400) {
        let before = compute_attendance_status(hours, absences).unwrap();
        let after = compute_attendance_status(hours, absences + 1).unwrap();
        prop_assert!(after.percentage >= before.percentage);
    }

    #[test]
    fn allowance_is_floored_quarter(hours in 0.5f64..500.0, absences in 0u32..400) {
        let status = compute_attendance_status(hours, absences).unwrap();
        let expected = (hours * 60.0 * 0.25 / 50.0).floor() as u32;
        prop_assert_eq!(status.max_allowed_absence_sessions, expected);
        prop_assert_eq!(
            status.remaining_absence_sessions,
            expected.saturating_sub(absences)
        );
    }

    #[test]
    fn risk_level_matches_thresholds(hours in 0.5f64..500.0, absences in 0u32..400) {
        let status = compute_attendance_status(hours, absences).unwrap();
        let expected = if status.percentage >= 25.0 {
            RiskLevel::Danger
        } else if status.percentage >= 20.0 {
            RiskLevel::Warning
        } else {
            RiskLevel::Safe
        };
        prop_assert_eq!(status.risk_level, expected);
    }

    #[test]
    fn non_positive_course_load_is_never_reported(hours in -500.0f64..=0.0, absences in 0u32..400) {
        prop_assert!(compute_attendance_status(hours, absences).is_none());
    }

    #[test]
    fn decrement_never_goes_below_zero(start in 0u32..5, steps in 0usize..10) {
        let mut count = AbsenceCount::new(start);
        for _ in 0..steps {
            count = count.decrement();
        }
        prop_assert_eq!(count.get(), start.saturating_sub(steps as u32));
    }
}
