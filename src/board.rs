//! Composition of the task and history stores
//!
//! [`TaskBoard`] is the single entry point the CLI and the terminal UI use.
//! It wires both stores to one backend and performs the delete cascade: a
//! successful [`TaskStore::delete`] is followed by [`HistoryStore::append`]
//! with the removed task's text. The stores themselves never call each other.

use crate::backend::KeyValueStore;
use crate::clock::{Clock, SystemClock};
use crate::config::{BackendKind, Config};
use crate::database::SqliteStore;
use crate::error::Result;
use crate::file_store::FileStore;
use crate::history::{HistoryEntry, HistoryStore};
use crate::task::{Task, TaskFilter, TaskStore};
use crate::types::TaskId;
use std::rc::Rc;
use tracing::error;

/// Counts shown by the status command and the UI header
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardSummary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub history: usize,
}

/// Task list plus deletion history over one key-value backend
pub struct TaskBoard {
    tasks: TaskStore,
    history: HistoryStore,
    backend: Rc<dyn KeyValueStore>,
    record_cleared: bool,
}

impl TaskBoard {
    /// Build a board over an existing backend and clock
    pub fn new(backend: Rc<dyn KeyValueStore>, clock: Rc<dyn Clock>) -> Self {
        Self {
            tasks: TaskStore::new(Rc::clone(&backend), Rc::clone(&clock)),
            history: HistoryStore::new(Rc::clone(&backend), clock),
            backend,
            record_cleared: false,
        }
    }

    /// Open the backend selected by `config` with the system clock
    pub fn open(config: &Config) -> Result<Self> {
        let backend: Rc<dyn KeyValueStore> = match config.backend {
            BackendKind::Sqlite => Rc::new(SqliteStore::new(&config.database_path())?),
            BackendKind::File => Rc::new(FileStore::new(&config.data_dir)?),
        };
        Ok(Self::new(backend, Rc::new(SystemClock)).record_cleared(config.history.record_cleared))
    }

    /// Also record tasks removed by [`TaskBoard::clear_completed`] in history
    pub fn record_cleared(mut self, enabled: bool) -> Self {
        self.record_cleared = enabled;
        self
    }

    /// Where the data lives
    pub fn location(&self) -> String {
        self.backend.describe()
    }

    pub fn tasks(&self, filter: TaskFilter) -> Vec<Task> {
        self.tasks.list_filtered(filter)
    }

    pub fn task(&self, id: TaskId) -> Option<Task> {
        self.tasks.get(id)
    }

    pub fn count(&self, filter: TaskFilter) -> usize {
        self.tasks.count(filter)
    }

    pub fn add_task(&self, text: &str) -> Result<Task> {
        self.tasks.add(text)
    }

    pub fn toggle_task(&self, id: TaskId) -> Result<Task> {
        self.tasks.toggle_completed(id)
    }

    /// Delete a task and record it in history
    ///
    /// If the history write fails the task stays deleted and the error is
    /// returned to the caller.
    pub fn delete_task(&self, id: TaskId) -> Result<(Task, HistoryEntry)> {
        let removed = self.tasks.delete(id)?;
        let entry = self.history.append(&removed.text).map_err(|e| {
            error!(id = %id, error = %e, "task deleted but history entry was not saved");
            e
        })?;
        Ok((removed, entry))
    }

    /// Remove all completed tasks
    ///
    /// History is only touched when `record_cleared` is enabled.
    pub fn clear_completed(&self) -> Result<Vec<Task>> {
        let removed = self.tasks.clear_completed()?;
        if self.record_cleared {
            for task in &removed {
                self.history.append(&task.text)?;
            }
        }
        Ok(removed)
    }

    /// Deleted tasks, most recent first
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.list_all()
    }

    pub fn clear_history(&self) -> Result<()> {
        self.history.clear()
    }

    pub fn summary(&self) -> BoardSummary {
        let tasks = self.tasks.list_all();
        let completed = tasks.iter().filter(|task| task.completed).count();
        BoardSummary {
            total: tasks.len(),
            active: tasks.len() - completed,
            completed,
            history: self.history.len(),
        }
    }
}
