//! Book catalog use-case service.
//!
//! # Responsibility
//! - Provide stable catalog entry points for transport callers.
//! - Validate caller input, then delegate to a repository implementation.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Repository errors are returned unchanged; nothing is retried.
//! - Service layer remains storage-agnostic.

use crate::model::book::{Book, BookId, BookPatch, BookValidationError, NewBook};
use crate::repo::book_repo::{BookRepository, RepoResult};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Request model for a recommendation lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub genre: String,
    pub purpose: String,
    /// Free-form book type hint (e.g. "Novel"). Accepted for wire
    /// compatibility but not used for matching.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl RecommendRequest {
    pub fn new(genre: impl Into<String>, purpose: impl Into<String>) -> Self {
        Self {
            genre: genre.into(),
            purpose: purpose.into(),
            kind: None,
        }
    }

    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.genre.trim().is_empty() {
            return Err(BookValidationError::EmptyField("genre"));
        }
        if self.purpose.trim().is_empty() {
            return Err(BookValidationError::EmptyField("purpose"));
        }
        Ok(())
    }
}

/// Use-case service wrapper for catalog operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Borrows the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Validates and persists a new book.
    ///
    /// # Errors
    /// - `RepoError::Validation` when any field is blank.
    /// - `RepoError::Storage` when the insert fails.
    pub fn create_book(&self, book: &NewBook) -> RepoResult<Book> {
        if let Err(err) = book.validate() {
            warn!("event=book_create module=service status=rejected error={err}");
            return Err(err.into());
        }
        let created = self.repo.create(book)?;
        info!(
            "event=book_create module=service status=ok book_id={}",
            created.id
        );
        Ok(created)
    }

    /// Lists the whole catalog.
    pub fn list_books(&self) -> RepoResult<Vec<Book>> {
        let books = self.repo.get_all()?;
        debug!("event=book_list module=service status=ok count={}", books.len());
        Ok(books)
    }

    pub fn get_book(&self, id: BookId) -> RepoResult<Book> {
        self.repo.get_by_id(id)
    }

    /// Applies a partial update after validating the supplied fields.
    ///
    /// An empty patch is passed through and returns the stored book.
    pub fn update_book(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        if let Err(err) = patch.validate() {
            warn!("event=book_update module=service status=rejected book_id={id} error={err}");
            return Err(err.into());
        }
        let updated = self.repo.update(id, patch)?;
        info!("event=book_update module=service status=ok book_id={id}");
        Ok(updated)
    }

    pub fn delete_book(&self, id: BookId) -> RepoResult<Book> {
        self.repo.delete(id)
    }

    /// Returns one book matching the requested genre and purpose exactly.
    ///
    /// # Contract
    /// - Matching is case-sensitive on both fields.
    /// - `kind` does not participate in matching.
    /// - With several candidates, the lowest id wins.
    pub fn recommend(&self, request: &RecommendRequest) -> RepoResult<Book> {
        request.validate()?;
        match self
            .repo
            .find_by_genre_and_purpose(&request.genre, &request.purpose)
        {
            Ok(book) => {
                info!(
                    "event=book_recommend module=service status=ok book_id={}",
                    book.id
                );
                Ok(book)
            }
            Err(err) if err.is_not_found() => {
                info!(
                    "event=book_recommend module=service status=miss genre={} purpose={}",
                    request.genre, request.purpose
                );
                Err(err)
            }
            Err(err) => {
                warn!("event=book_recommend module=service status=error error={err}");
                Err(err)
            }
        }
    }
}
