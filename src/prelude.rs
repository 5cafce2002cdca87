//! Prelude module for Ticklist
//!
//! This module re-exports commonly used types and traits to reduce
//! boilerplate imports.
//!
//! # Usage
//!
//! ```rust
//! use ticklist::prelude::*;
//! ```

pub use crate::backend::KeyValueStore;
pub use crate::board::TaskBoard;
pub use crate::clock::Clock;
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::history::HistoryEntry;
pub use crate::task::{Task, TaskFilter};
pub use crate::types::{EntryId, TaskId};

// Re-export commonly used external types
pub use chrono::{DateTime, Utc};
