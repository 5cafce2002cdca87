//! Common backend trait for persisted collections
//!
//! This module defines the KeyValueStore trait that the SQLite, file and
//! in-memory backends implement, plus the collection codec the stores use on
//! top of it. A collection is always read and written as a whole under a
//! single key; there is no per-record addressing.

use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Common interface for key-value storage backends
///
/// Reads and writes are synchronous from the caller's point of view and a
/// write is either fully visible or not at all. A missing key means "empty".
pub trait KeyValueStore {
    /// Read the raw value stored under `key`
    #[must_use = "Query results should be used"]
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Drop `key` entirely
    fn remove(&self, key: &str) -> Result<()>;

    /// Human readable location, for status output and logs
    fn describe(&self) -> String;
}

/// Volatile backend used by tests and dry runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently held
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

/// Load a whole collection from `key`.
///
/// Fails open: a missing key, an unreadable backend or undecodable contents
/// all yield an empty collection. Only the latter two are logged.
pub fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "no stored collection, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read collection, treating as empty");
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => {
            debug!(key, count = items.len(), "loaded collection");
            items
        }
        Err(e) => {
            warn!(key, error = %e, "stored collection is corrupt, treating as empty");
            Vec::new()
        }
    }
}

/// Serialize `items` and replace the collection stored under `key`.
pub fn save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<()> {
    let payload = serde_json::to_string(items).map_err(|e| Error::persistence(key, e))?;
    store.write(key, &payload).map_err(|e| match e {
        Error::Persistence { .. } => e,
        other => Error::persistence(key, other),
    })?;
    debug!(key, count = items.len(), "saved collection");
    Ok(())
}
