//! Snapshot of planner state and the commands that produce the next one.
//!
//! A [`Snapshot`] is never mutated in place: [`Snapshot::apply`] returns a new
//! snapshot with one change applied. [`Planner`] wires this to a [`Store`]:
//! load, apply, write back.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{Store, SUBJECTS_KEY, TASKS_KEY};
use crate::subject::Subject;
use crate::task::Task;

/// The full subject and task collections at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub subjects: Vec<Subject>,
    pub tasks: Vec<Task>,
}

/// A single user-initiated change.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert a new subject or replace the one with the same id
    SaveSubject(Subject),
    /// Remove a subject and all of its tasks
    DeleteSubject(String),
    /// Insert a new task or replace the one with the same id
    SaveTask(Task),
    DeleteTask(String),
    ToggleTaskStatus(String),
    AddAbsence(String),
    /// Decrement absences; no-op at zero
    RemoveAbsence(String),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::SaveSubject(_) => "save_subject",
            Command::DeleteSubject(_) => "delete_subject",
            Command::SaveTask(_) => "save_task",
            Command::DeleteTask(_) => "delete_task",
            Command::ToggleTaskStatus(_) => "toggle_task_status",
            Command::AddAbsence(_) => "add_absence",
            Command::RemoveAbsence(_) => "remove_absence",
        }
    }

    /// Whether the command can change the subject / task collections.
    fn touches(&self) -> (bool, bool) {
        match self {
            Command::SaveSubject(_) | Command::AddAbsence(_) | Command::RemoveAbsence(_) => {
                (true, false)
            }
            Command::DeleteSubject(_) => (true, true),
            Command::SaveTask(_) | Command::DeleteTask(_) | Command::ToggleTaskStatus(_) => {
                (false, true)
            }
        }
    }
}

fn upsert<T: Clone>(items: &[T], item: T, same: impl Fn(&T) -> bool) -> Vec<T> {
    let mut next = items.to_vec();
    match next.iter().position(same) {
        Some(index) => next[index] = item,
        None => next.push(item),
    }
    next
}

impl Snapshot {
    pub fn new(subjects: Vec<Subject>, tasks: Vec<Task>) -> Self {
        Self { subjects, tasks }
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Tasks belonging to `subject_id`, in stored order.
    pub fn tasks_for_subject<'a>(&'a self, subject_id: &'a str) -> impl Iterator<Item = &'a Task> {
        self.tasks.iter().filter(move |t| t.subject_id == subject_id)
    }

    /// Apply one command and return the resulting snapshot.
    ///
    /// Commands that name an unknown id leave the collections unchanged.
    pub fn apply(&self, command: Command) -> Snapshot {
        tracing::debug!(command = command.name(), "applying command");
        match command {
            Command::SaveSubject(subject) => Snapshot {
                subjects: upsert(&self.subjects, subject.clone(), |s| s.id == subject.id),
                tasks: self.tasks.clone(),
            },
            Command::DeleteSubject(id) => Snapshot {
                subjects: self.subjects.iter().filter(|s| s.id != id).cloned().collect(),
                tasks: self.tasks.iter().filter(|t| t.subject_id != id).cloned().collect(),
            },
            Command::SaveTask(task) => Snapshot {
                subjects: self.subjects.clone(),
                tasks: upsert(&self.tasks, task.clone(), |t| t.id == task.id),
            },
            Command::DeleteTask(id) => Snapshot {
                subjects: self.subjects.clone(),
                tasks: self.tasks.iter().filter(|t| t.id != id).cloned().collect(),
            },
            Command::ToggleTaskStatus(id) => Snapshot {
                subjects: self.subjects.clone(),
                tasks: self
                    .tasks
                    .iter()
                    .map(|t| {
                        let mut t = t.clone();
                        if t.id == id {
                            t.toggle_status();
                        }
                        t
                    })
                    .collect(),
            },
            Command::AddAbsence(id) => self.map_subject(&id, |s| s.absences = s.absences.increment()),
            Command::RemoveAbsence(id) => {
                self.map_subject(&id, |s| s.absences = s.absences.decrement())
            }
        }
    }

    fn map_subject(&self, id: &str, f: impl Fn(&mut Subject)) -> Snapshot {
        Snapshot {
            subjects: self
                .subjects
                .iter()
                .map(|s| {
                    let mut s = s.clone();
                    if s.id == id {
                        f(&mut s);
                    }
                    s
                })
                .collect(),
            tasks: self.tasks.clone(),
        }
    }
}

/// Command dispatcher over a persistent store.
pub struct Planner<S: Store> {
    store: S,
}

impl<S: Store> Planner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current snapshot as stored.
    ///
    /// # Errors
    /// Returns an error if either collection cannot be read or decoded.
    pub fn snapshot(&self) -> Result<Snapshot> {
        Ok(Snapshot {
            subjects: self.store.load(SUBJECTS_KEY)?,
            tasks: self.store.load(TASKS_KEY)?,
        })
    }

    /// Apply `command` to the stored snapshot and persist the result.
    ///
    /// Only collections the command can change are written back. When both
    /// change they are saved together, tasks first, so a failed write never
    /// leaves tasks pointing at a deleted subject.
    ///
    /// # Errors
    /// Returns an error if loading or saving fails.
    pub fn dispatch(&self, command: Command) -> Result<Snapshot> {
        let touched = command.touches();
        let next = self.snapshot()?.apply(command);
        match touched {
            (true, true) => self.store.save_pair(
                (TASKS_KEY, next.tasks.as_slice()),
                (SUBJECTS_KEY, next.subjects.as_slice()),
            )?,
            (true, false) => self.store.save(SUBJECTS_KEY, &next.subjects)?,
            (false, true) => self.store.save(TASKS_KEY, &next.tasks)?,
            (false, false) => {}
        }
        Ok(next)
    }

    pub fn find_subject(&self, id: &str) -> Result<Option<Subject>> {
        Ok(self.snapshot()?.subject(id).cloned())
    }

    pub fn find_task(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.snapshot()?.task(id).cloned())
    }
}
