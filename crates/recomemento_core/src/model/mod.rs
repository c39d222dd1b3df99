//! Catalog domain model.
//!
//! # Responsibility
//! - Define the canonical book record and its insert/patch payloads.
//! - Own boundary validation for caller-supplied field values.
//!
//! # Invariants
//! - Every stored book is identified by a store-assigned `BookId`.
//! - Deletion is permanent; there is no tombstone state.

pub mod book;
