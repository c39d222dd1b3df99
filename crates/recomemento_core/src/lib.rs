//! Core domain logic for the Recomemento book catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{CatalogConfig, ConfigError};
pub use db::seed::{baseline_books, seed_if_empty};
pub use db::{open_store, open_store_in_memory, DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status};
pub use model::book::{Book, BookId, BookPatch, BookValidationError, NewBook};
pub use repo::book_repo::{BookRepository, Lookup, RepoError, RepoResult, SqliteBookRepository};
pub use repo::memory_repo::InMemoryBookRepository;
pub use service::book_service::{BookService, RecommendRequest};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
