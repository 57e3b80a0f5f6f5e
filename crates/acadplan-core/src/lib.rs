//! # acadplan Core Library
//!
//! This library provides the core logic for acadplan, a planner that tracks
//! course tasks and class-absence budgets. All operations are available via
//! the standalone `acadplan` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Attendance**: pure absence-risk engine (percentage, allowance, risk level)
//! - **Tasks**: stored vs derived status and stable due-date ordering
//! - **Commands**: immutable snapshots and the commands that produce the next one
//! - **Board**: read-only view model combining both engines
//! - **Storage**: SQLite key-value store and TOML-based configuration
//!
//! ## Key Components
//!
//! - [`compute_attendance_status`]: attendance risk for a course load and absence count
//! - [`order_tasks`]: tasks in due-date order with their derived status
//! - [`Planner`]: load / apply / save over a [`Store`]
//! - [`Config`]: Application configuration management

pub mod attendance;
pub mod board;
pub mod commands;
pub mod error;
pub mod storage;
pub mod subject;
pub mod task;

pub use attendance::{attendance_report, compute_attendance_status, AttendanceStatus, RiskLevel};
pub use board::{AbsenceCard, Board, TaskCard};
pub use commands::{Command, Planner, Snapshot};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use storage::{Config, Database, DisplayConfig, MemoryStore, Store};
pub use subject::{AbsenceCount, CourseLoad, Subject};
pub use task::{derive_status, order_tasks, sort_by_due_date, DerivedStatus, OrderedTask, Task, TaskStatus};
