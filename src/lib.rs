//! Ticklist - local task list with a deletion history
//!
//! This library provides functionality for:
//! - Adding, completing, filtering and removing tasks
//! - Recording deleted tasks in a history log, most recent first
//! - Persisting both collections in SQLite or plain JSON files
//! - A terminal UI and a command-line front end over the same board
//!
//! # Examples
//!
//! ```rust
//! use std::rc::Rc;
//! use ticklist::{MemoryStore, SystemClock, TaskBoard, TaskFilter};
//!
//! let board = TaskBoard::new(Rc::new(MemoryStore::new()), Rc::new(SystemClock));
//! let task = board.add_task("buy milk")?;
//! board.toggle_task(task.id)?;
//! assert_eq!(board.count(TaskFilter::Completed), 1);
//!
//! board.delete_task(task.id)?;
//! assert_eq!(board.history()[0].text, "buy milk");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::path::PathBuf;

pub mod backend;
pub mod board;
pub mod cli;
pub mod clock;
pub mod config;
pub mod database;
pub mod error;
pub mod file_store;
pub mod history;
pub mod lock;
pub mod prelude;
pub mod task;
pub mod tui;
pub mod types;

pub use backend::{KeyValueStore, MemoryStore};
pub use board::{BoardSummary, TaskBoard};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use database::SqliteStore;
pub use error::{Error, Result};
pub use file_store::FileStore;
pub use history::{HistoryEntry, HistoryStore};
pub use task::{Task, TaskFilter, TaskStore};
pub use types::{EntryId, TaskId};

/// The default data directory name, relative to the home directory
pub const DEFAULT_DATA_DIR: &str = ".ticklist";

/// Get the default data directory path
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or(Error::HomeDirectoryNotFound)?;
    Ok(home.join(DEFAULT_DATA_DIR))
}

/// Open the board with the configuration from the default location
pub fn init() -> Result<TaskBoard> {
    let config = Config::load()?;
    TaskBoard::open(&config)
}

/// Open the board with a custom configuration
pub fn init_with_config(config: &Config) -> Result<TaskBoard> {
    TaskBoard::open(config)
}
