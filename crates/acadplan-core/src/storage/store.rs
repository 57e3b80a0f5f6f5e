//! Key-value persistence for entity collections.
//!
//! A store holds whole collections under a key. `save` replaces the previous
//! value for that key; there is no partial update or merge. Loading a key
//! that was never written yields an empty collection.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::Result;

/// Key for the subject collection.
pub const SUBJECTS_KEY: &str = "subjects";

/// Key for the task collection.
pub const TASKS_KEY: &str = "tasks";

/// Synchronous collection store.
pub trait Store {
    /// Load the collection stored under `key`, or an empty one.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>>;

    /// Replace the collection stored under `key`.
    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()>;

    /// Replace two collections as one unit.
    ///
    /// The default writes `first` then `second` and stops at the first
    /// failure, so callers pass the collection that refers to the other one
    /// first. Stores that support transactions override this to write both or
    /// neither.
    fn save_pair<A: Serialize, B: Serialize>(
        &self,
        first: (&str, &[A]),
        second: (&str, &[B]),
    ) -> Result<()> {
        self.save(first.0, first.1)?;
        self.save(second.0, second.1)
    }
}

/// In-process store backed by a map of JSON strings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON stored under `key`.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl Store for MemoryStore {
    fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.entries.borrow().get(key) {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.entries.borrow_mut().insert(key.to_string(), json);
        Ok(())
    }

    fn save_pair<A: Serialize, B: Serialize>(
        &self,
        first: (&str, &[A]),
        second: (&str, &[B]),
    ) -> Result<()> {
        let first_json = serde_json::to_string(first.1)?;
        let second_json = serde_json::to_string(second.1)?;
        let mut entries = self.entries.borrow_mut();
        entries.insert(first.0.to_string(), first_json);
        entries.insert(second.0.to_string(), second_json);
        Ok(())
    }
}
