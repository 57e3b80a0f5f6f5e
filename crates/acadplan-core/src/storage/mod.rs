mod config;
pub mod database;
pub mod store;

pub use config::{Config, DisplayConfig, SubjectsConfig};
pub use database::Database;
pub use store::{MemoryStore, Store, SUBJECTS_KEY, TASKS_KEY};

use std::path::PathBuf;

use crate::error::Result;

/// Returns the acadplan data directory, creating it if needed.
///
/// `ACADPLAN_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/acadplan/`, or `~/.config/acadplan-dev/` when `ACADPLAN_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("ACADPLAN_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("ACADPLAN_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("acadplan-dev")
            } else {
                base_dir.join("acadplan")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
