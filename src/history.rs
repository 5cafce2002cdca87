//! Deletion history for Ticklist
//!
//! The [`HistoryStore`] owns the `todoHistory` collection. Entries are only
//! ever appended (one per deleted task) and only ever removed all at once by
//! [`HistoryStore::clear`].

use crate::backend::{load_collection, save_collection, KeyValueStore};
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::types::{next_time_id, EntryId};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::info;

/// Storage key of the history collection
pub const HISTORY_KEY: &str = "todoHistory";

/// Default display format for deletion times
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d %H:%M";

/// A task that was deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique id within the history, independent of task ids
    pub id: EntryId,
    /// Text of the deleted task
    pub text: String,
    /// When the task was deleted
    pub deleted_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Deletion time in the local timezone using a strftime-style `format`
    pub fn formatted_deleted_at(&self, format: &str) -> String {
        self.deleted_at.with_timezone(&Local).format(format).to_string()
    }
}

/// Owner of the deletion history
pub struct HistoryStore {
    store: Rc<dyn KeyValueStore>,
    clock: Rc<dyn Clock>,
}

impl HistoryStore {
    pub fn new(store: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    fn load(&self) -> Vec<HistoryEntry> {
        load_collection(self.store.as_ref(), HISTORY_KEY)
    }

    /// All entries, most recently deleted first
    ///
    /// Entries sharing a deletion time come out newest-appended first.
    #[must_use = "Query results should be used"]
    pub fn list_all(&self) -> Vec<HistoryEntry> {
        let mut entries = self.load();
        entries.reverse();
        entries.sort_by(|a, b| b.deleted_at.cmp(&a.deleted_at));
        entries
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Record a deleted task's text
    ///
    /// Only fails when the collection cannot be written.
    pub fn append(&self, text: &str) -> Result<HistoryEntry> {
        let mut entries = self.load();
        let now = self.clock.now();
        let id = next_time_id(now, entries.iter().map(|entry| entry.id.as_i64()))?;

        let entry = HistoryEntry {
            id: EntryId::new(id),
            text: text.to_string(),
            deleted_at: now,
        };
        entries.push(entry.clone());
        save_collection(self.store.as_ref(), HISTORY_KEY, &entries)?;

        info!(id = %entry.id, "recorded deletion in history");
        Ok(entry)
    }

    /// Drop every entry
    pub fn clear(&self) -> Result<()> {
        self.store
            .remove(HISTORY_KEY)
            .map_err(|e| Error::persistence(HISTORY_KEY, e))?;
        info!("cleared history");
        Ok(())
    }
}
