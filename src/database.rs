//! SQLite storage for Ticklist
//!
//! This module provides the default key-value backend: a single `kv` table in
//! a local SQLite database. Each collection lives in one row, so replacing a
//! collection is a single upsert and never leaves a half-written value behind.

use crate::backend::KeyValueStore;
use crate::error::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Metadata about one stored key
#[derive(Debug, Clone)]
pub struct KeyInfo {
    pub key: String,
    pub bytes: usize,
    pub updated_at: Option<DateTime<Utc>>,
}

/// SQLite-backed key-value store
pub struct SqliteStore {
    conn: Connection,
    path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path` and initialize the schema
    #[must_use = "Database connection must be used"]
    pub fn new(db_path: &Path) -> Result<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        let store = Self {
            conn,
            path: db_path.to_path_buf(),
        };
        store.initialize_schema()?;

        debug!(path = %db_path.display(), "opened sqlite store");
        Ok(store)
    }

    /// Open a private in-memory database
    pub fn in_memory() -> Result<Self> {
        let store = Self {
            conn: Connection::open_in_memory()?,
            path: PathBuf::from(":memory:"),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Path of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// List stored keys with their size and last write time
    #[must_use = "Query results should be used"]
    pub fn keys(&self) -> Result<Vec<KeyInfo>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key, LENGTH(value), updated_at FROM kv ORDER BY key")?;

        let keys = stmt
            .query_map([], |row| {
                Ok(KeyInfo {
                    key: row.get(0)?,
                    bytes: row.get::<_, i64>(1)? as usize,
                    updated_at: row.get::<_, DateTime<Utc>>(2).ok(),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(keys)
    }
}

impl KeyValueStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now();
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sqlite:{}", self.path.display())
    }
}
