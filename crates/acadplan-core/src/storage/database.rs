//! SQLite-backed collection store.
//!
//! Collections are kept as JSON arrays in a single key-value table, so a save
//! is one `INSERT OR REPLACE` and always replaces the whole collection.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

use super::data_dir;
use super::store::Store;
use crate::error::{DatabaseError, Result};

/// SQLite database for subject and task collections.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data_dir>/acadplan.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("acadplan.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "opened database");
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        kv_set_on(&self.conn, key, value)
    }

    /// Set several kv entries in one transaction. Either all are written or
    /// none are.
    pub fn kv_set_many(&self, entries: &[(&str, &str)]) -> Result<(), rusqlite::Error> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in entries {
            kv_set_on(&tx, key, value)?;
        }
        tx.commit()
    }
}

fn kv_set_on(conn: &Connection, key: &str, value: &str) -> Result<(), rusqlite::Error> {
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
        params![key, value],
    )?;
    Ok(())
}

impl Store for Database {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.kv_get(key)? {
            Some(json) => {
                let items: Vec<T> = serde_json::from_str(&json)?;
                tracing::trace!(key, count = items.len(), "loaded collection");
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.kv_set(key, &json)?;
        tracing::trace!(key, count = items.len(), "saved collection");
        Ok(())
    }

    fn save_pair<A: Serialize, B: Serialize>(
        &self,
        first: (&str, &[A]),
        second: (&str, &[B]),
    ) -> Result<()> {
        let first_json = serde_json::to_string(first.1)?;
        let second_json = serde_json::to_string(second.1)?;
        self.kv_set_many(&[(first.0, first_json.as_str()), (second.0, second_json.as_str())])?;
        tracing::trace!(first = first.0, second = second.0, "saved collections");
        Ok(())
    }
}
