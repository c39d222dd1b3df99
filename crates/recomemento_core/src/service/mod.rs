//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Enforce boundary validation before anything reaches storage.
//! - Keep CLI/transport layers decoupled from storage details.

pub mod book_service;
