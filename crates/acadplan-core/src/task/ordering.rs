//! Chronological ordering of the task collection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{derive_status, DerivedStatus, Task};

/// A task in display order together with its derived status.
#[derive(Debug, Clone, Serialize)]
pub struct OrderedTask<'a> {
    /// 0-based index in due-date order
    pub position: usize,
    pub task: &'a Task,
    pub derived: DerivedStatus,
}

/// Tasks sorted by ascending due date.
///
/// The sort is stable, so tasks sharing a due date keep their input order.
/// The input slice is left untouched.
pub fn sort_by_due_date(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by_key(|task| task.due_date);
    sorted
}

/// Tasks in due-date order, each annotated with its status at `now`.
pub fn order_tasks(tasks: &[Task], now: DateTime<Utc>) -> Vec<OrderedTask<'_>> {
    let mut refs: Vec<&Task> = tasks.iter().collect();
    refs.sort_by_key(|task| task.due_date);
    refs.into_iter()
        .enumerate()
        .map(|(position, task)| OrderedTask {
            position,
            task,
            derived: derive_status(task, now),
        })
        .collect()
}
