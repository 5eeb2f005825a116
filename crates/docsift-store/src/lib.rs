//! docsift Storage Layer
//!
//! Implements the `KeyValueStore` trait and the versioned documents built on it.
//!
//! # Architecture
//!
//! - `SqliteStore`: a single `kv` table, one row per persisted document
//! - `MemoryStore`: a `HashMap` backend for tests and throwaway sessions
//! - `Persisted`: the `{ "version": 1, "state": { ... } }` envelope
//! - `ProjectRepository`: the project list, stored as one document
//!
//! # Examples
//!
//! ```no_run
//! use docsift_store::{ProjectRepository, SqliteStore};
//!
//! let store = SqliteStore::new("docsift.db").unwrap();
//! let mut projects = ProjectRepository::new(store);
//! let project = projects.create("Invoices", None).unwrap();
//! assert_eq!(projects.list().unwrap()[0].id, project.id);
//! ```

#![warn(missing_docs)]

mod memory;
mod persisted;
mod projects;

use docsift_domain::traits::KeyValueStore;
use docsift_domain::unix_timestamp;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use thiserror::Error;

pub use memory::MemoryStore;
pub use persisted::{Persisted, DRAFT_KEY, PROJECTS_KEY, STATE_VERSION};
pub use projects::ProjectRepository;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Persisted document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);
";

/// SQLite-based implementation of KeyValueStore
///
/// Each persisted document is one row. Writes replace the whole document,
/// so concurrent writers follow last-writer-wins.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should have its own SqliteStore instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a new SqliteStore with the given database path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use docsift_store::SqliteStore;
    ///
    /// let store = SqliteStore::new("docsift.db").unwrap();
    /// ```
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// All stored keys, sorted
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT key FROM kv ORDER BY key")?;
        let keys = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStore for SqliteStore {
    type Error = StoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, unix_timestamp() as i64],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), Self::Error> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}
