//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations and the `books` shape check before returning
//!   a usable store.
//!
//! # Invariants
//! - Returned stores have `foreign_keys=ON` and a busy timeout set.
//! - Returned stores have migrations fully applied.

use super::migrations::{apply_migrations, verify_books_schema};
use super::{DbError, DbResult, Store};
use log::{error, info};
use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens (or creates) the catalog database file at `path`.
///
/// # Errors
/// - `DbError::Connection` when the file or its directory is inaccessible,
///   or the file is not a SQLite database.
/// - Any schema-family `DbError` when bootstrap or migrations fail.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_store(path: impl AsRef<Path>) -> DbResult<Store> {
    let path = path.as_ref();
    let conn = open_connection("file", path.display().to_string(), || {
        Connection::open(path)
    })?;
    Ok(Store::new(conn, Some(path.to_path_buf())))
}

/// Opens a private in-memory catalog database, used by tests and tools.
///
/// # Side effects
/// - Emits `db_open` logging events with duration and status.
pub fn open_store_in_memory() -> DbResult<Store> {
    let conn = open_connection("memory", ":memory:".to_string(), Connection::open_in_memory)?;
    Ok(Store::new(conn, None))
}

fn open_connection(
    mode: &str,
    label: String,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match open() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            return Err(DbError::Connection {
                path: label,
                source: err,
            });
        }
    };

    match bootstrap_connection(&mut conn) {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(DbError::Schema(source)) if is_unopenable(&source) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_open_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            Err(DbError::Connection {
                path: label,
                source,
            })
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={mode} duration_ms={} error_code=db_bootstrap_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// SQLite opens files lazily; a non-database file or an unreadable one only
/// surfaces on the first statement.
fn is_unopenable(err: &rusqlite::Error) -> bool {
    matches!(
        err.sqlite_error_code(),
        Some(ErrorCode::NotADatabase | ErrorCode::CannotOpen)
    )
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    verify_books_schema(conn)?;
    Ok(())
}
