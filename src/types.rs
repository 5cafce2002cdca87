//! Type definitions for Ticklist
//!
//! This module provides type-safe wrappers around primitive types
//! to prevent accidental misuse of task and history ids.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A type-safe wrapper for task IDs
///
/// Prevents accidentally passing a history entry ID where a task ID is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Create a new TaskId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for TaskId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<TaskId> for i64 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(TaskId::new)
    }
}

/// A type-safe wrapper for history entry IDs
///
/// History entries are numbered independently from tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl EntryId {
    /// Create a new EntryId
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner i64 value
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for EntryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<EntryId> for i64 {
    fn from(id: EntryId) -> Self {
        id.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pick a fresh id for a record created at `now`.
///
/// Ids follow the creation time in milliseconds. When two records land in the
/// same millisecond, or the clock steps backwards, the id is bumped past the
/// largest one already in use so ids stay unique and increasing. Fails once
/// the largest id is `i64::MAX`.
pub(crate) fn next_time_id<I>(now: DateTime<Utc>, existing: I) -> Result<i64>
where
    I: IntoIterator<Item = i64>,
{
    let candidate = now.timestamp_millis();
    match existing.into_iter().max() {
        Some(max) if max >= candidate => max
            .checked_add(1)
            .ok_or_else(|| Error::custom(format!("no id left after {}", max))),
        _ => Ok(candidate),
    }
}
