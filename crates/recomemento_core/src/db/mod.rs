//! SQLite storage bootstrap, schema migration and seeding entry points.
//!
//! # Responsibility
//! - Open and configure the single SQLite connection behind a `Store`.
//! - Apply schema migrations in deterministic order.
//! - Seed baseline books into an empty catalog.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - A `Store` is only handed out after migrations and the `books` shape
//!   check have succeeded.
//! - Only the repository layer reads or writes `books` rows.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;

pub mod migrations;
mod open;
pub mod seed;

pub use open::{open_store, open_store_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Startup-time storage failures. All variants are fatal for the process.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file or location could not be opened.
    #[error("cannot open database at `{path}`: {source}")]
    Connection {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Connection configuration or migration SQL failed.
    #[error("schema setup failed: {0}")]
    Schema(#[from] rusqlite::Error),
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    #[error("required table `{0}` does not exist")]
    MissingTable(&'static str),
    #[error("table `{table}` is missing required column `{column}`")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl DbError {
    /// Returns `true` for the schema family of failures (as opposed to the
    /// store being unreachable).
    pub fn is_schema_error(&self) -> bool {
        !matches!(self, Self::Connection { .. })
    }
}

/// Handle to the catalog database.
///
/// Owns the single SQLite connection. Callers share a `&Store` across
/// threads; statements are serialized on the inner mutex and isolation
/// between writers is left to SQLite itself.
pub struct Store {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Store {
    fn new(conn: Connection, path: Option<PathBuf>) -> Self {
        Self {
            conn: Mutex::new(conn),
            path,
        }
    }

    /// Backing database file, or `None` for an in-memory store.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Runs `f` with exclusive access to the underlying connection.
    ///
    /// Crate-private: only the repository layer issues SQL against a store.
    /// A panic in an earlier caller does not leave SQLite state half-applied
    /// (open transactions roll back on drop), so a poisoned lock is reused.
    pub(crate) fn with_conn<T>(&self, f: impl FnOnce(&mut Connection) -> T) -> T {
        let mut guard = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("path", &self.path).finish()
    }
}
