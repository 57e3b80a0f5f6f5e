//! Subcommand implementations. Each module owns one noun.

pub mod absence;
pub mod board;
pub mod config;
pub mod subject;
pub mod task;

use acadplan_core::{Database, Planner};
use chrono::{DateTime, NaiveDate, Utc};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Planner over the on-disk database.
pub fn open_planner() -> Result<Planner<Database>, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    tracing::debug!("opened planner database");
    Ok(Planner::new(db))
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
pub fn parse_due_date(input: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date '{input}': expected YYYY-MM-DD or RFC 3339"))
}
