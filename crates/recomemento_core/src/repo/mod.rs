//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the book catalog data access contract.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   storage transport errors.
//! - Nothing is retried or cached; every call is one storage round-trip.

pub mod book_repo;
pub mod memory_repo;
