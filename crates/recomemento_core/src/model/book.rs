//! Book domain model.
//!
//! # Responsibility
//! - Define the stored `Book` record, the `NewBook` insert payload and the
//!   sparse `BookPatch` update payload.
//! - Validate that caller-supplied text fields are non-empty.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - No field other than `id` is unique; duplicate titles are allowed.
//! - A `BookPatch` only ever touches the fields it carries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Store-assigned surrogate key of a book.
///
/// Kept as a type alias so signatures read as "book id" rather than "integer".
pub type BookId = i64;

/// Validation failure for caller-supplied book fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookValidationError {
    /// A required field (or a supplied patch field) is empty or whitespace.
    #[error("book field `{0}` must not be empty")]
    EmptyField(&'static str),
}

/// Insert payload: every attribute of a book except its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub purpose: String,
    pub description: String,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        purpose: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            purpose: purpose.into(),
            description: description.into(),
        }
    }

    /// Checks that every field carries non-blank text.
    ///
    /// # Errors
    /// - Returns `EmptyField` naming the first offending field, in
    ///   declaration order.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)?;
        require_text("genre", &self.genre)?;
        require_text("purpose", &self.purpose)?;
        require_text("description", &self.description)?;
        Ok(())
    }
}

/// Canonical stored book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub purpose: String,
    pub description: String,
}

impl Book {
    /// Assembles a stored record from an insert payload and its assigned id.
    pub fn from_new(id: BookId, book: NewBook) -> Self {
        Self {
            id,
            title: book.title,
            author: book.author,
            genre: book.genre,
            purpose: book.purpose,
            description: book.description,
        }
    }

    /// Returns the record without its id, e.g. to compare against the
    /// payload it was created from.
    pub fn to_new(&self) -> NewBook {
        NewBook {
            title: self.title.clone(),
            author: self.author.clone(),
            genre: self.genre.clone(),
            purpose: self.purpose.clone(),
            description: self.description.clone(),
        }
    }
}

/// Sparse partial update.
///
/// `None` means "leave the column untouched". An all-`None` patch is legal
/// and applies as a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BookPatch {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns `true` when the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_none())
    }

    /// Supplied `(column, value)` pairs in column order.
    pub fn present_fields(&self) -> Vec<(&'static str, &str)> {
        self.fields()
            .into_iter()
            .filter_map(|(column, value)| value.map(|value| (column, value)))
            .collect()
    }

    /// Checks that every supplied field carries non-blank text.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        for (column, value) in self.present_fields() {
            require_text(column, value)?;
        }
        Ok(())
    }

    /// Overwrites the supplied fields of `book`; absent fields keep their
    /// prior value.
    pub fn apply_to(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title.clone_from(title);
        }
        if let Some(author) = &self.author {
            book.author.clone_from(author);
        }
        if let Some(genre) = &self.genre {
            book.genre.clone_from(genre);
        }
        if let Some(purpose) = &self.purpose {
            book.purpose.clone_from(purpose);
        }
        if let Some(description) = &self.description {
            book.description.clone_from(description);
        }
    }

    fn fields(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("title", self.title.as_deref()),
            ("author", self.author.as_deref()),
            ("genre", self.genre.as_deref()),
            ("purpose", self.purpose.as_deref()),
            ("description", self.description.as_deref()),
        ]
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), BookValidationError> {
    if value.trim().is_empty() {
        return Err(BookValidationError::EmptyField(field));
    }
    Ok(())
}
