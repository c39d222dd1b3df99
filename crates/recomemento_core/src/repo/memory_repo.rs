//! In-memory book repository.
//!
//! Mirrors `SqliteBookRepository` semantics without a database: ids are
//! assigned from a monotonic counter and never reused, listing is in id
//! order, and recommendation picks the lowest matching id.

use crate::model::book::{Book, BookId, BookPatch, NewBook};
use crate::repo::book_repo::{BookRepository, Lookup, RepoError, RepoResult};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

struct CatalogState {
    books: BTreeMap<BookId, Book>,
    next_id: BookId,
}

/// Mutex-guarded map implementation of `BookRepository`.
pub struct InMemoryBookRepository {
    state: Mutex<CatalogState>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CatalogState {
                books: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BookRepository for InMemoryBookRepository {
    fn create(&self, book: &NewBook) -> RepoResult<Book> {
        let mut state = self.state();
        let id = state.next_id;
        state.next_id += 1;

        let stored = Book::from_new(id, book.clone());
        state.books.insert(id, stored.clone());
        Ok(stored)
    }

    fn get_all(&self) -> RepoResult<Vec<Book>> {
        Ok(self.state().books.values().cloned().collect())
    }

    fn get_by_id(&self, id: BookId) -> RepoResult<Book> {
        self.state()
            .books
            .get(&id)
            .cloned()
            .ok_or(RepoError::NotFound(Lookup::Id(id)))
    }

    fn update(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        let mut state = self.state();
        let book = state
            .books
            .get_mut(&id)
            .ok_or(RepoError::NotFound(Lookup::Id(id)))?;
        patch.apply_to(book);
        Ok(book.clone())
    }

    fn delete(&self, id: BookId) -> RepoResult<Book> {
        self.state()
            .books
            .remove(&id)
            .ok_or(RepoError::NotFound(Lookup::Id(id)))
    }

    fn find_by_genre_and_purpose(&self, genre: &str, purpose: &str) -> RepoResult<Book> {
        self.state()
            .books
            .values()
            .find(|book| book.genre == genre && book.purpose == purpose)
            .cloned()
            .ok_or_else(|| {
                RepoError::NotFound(Lookup::GenreAndPurpose {
                    genre: genre.to_string(),
                    purpose: purpose.to_string(),
                })
            })
    }

    fn count(&self) -> RepoResult<usize> {
        Ok(self.state().books.len())
    }

    fn create_all_if_empty(&self, books: &[NewBook]) -> RepoResult<Vec<Book>> {
        let mut state = self.state();
        if !state.books.is_empty() {
            return Ok(Vec::new());
        }

        let mut created = Vec::with_capacity(books.len());
        for book in books {
            let id = state.next_id;
            state.next_id += 1;
            let stored = Book::from_new(id, book.clone());
            state.books.insert(id, stored.clone());
            created.push(stored);
        }
        Ok(created)
    }
}
