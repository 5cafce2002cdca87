//! Command handler implementations for Ticklist CLI
//!
//! This module organizes command handlers into logical groups:
//! - `tasks`: Task commands (add, list, toggle, delete, clear-completed, count)
//! - `history`: Deletion history listing and clearing
//! - `config`: Configuration and status handlers
//! - `ui`: Interactive session and lock handling

mod config;
mod history;
mod tasks;
mod ui;

pub use config::*;
pub use history::*;
pub use tasks::*;
pub use ui::*;
