//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and recommendation lookup over the `books` table.
//! - Keep SQL and row mapping inside the persistence boundary.
//!
//! # Invariants
//! - `create` never writes an id; SQLite assigns it.
//! - `update` only writes the columns present in the patch.
//! - `find_by_genre_and_purpose` compares with case-sensitive equality and
//!   picks the lowest matching id.

use crate::db::Store;
use crate::model::book::{Book, BookId, BookPatch, BookValidationError, NewBook};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, TransactionBehavior,
};
use std::fmt::{Display, Formatter};
use thiserror::Error;

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    genre,
    purpose,
    description
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// What a failed lookup was looking for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Id(BookId),
    GenreAndPurpose { genre: String, purpose: String },
}

impl Display for Lookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "book {id}"),
            Self::GenreAndPurpose { genre, purpose } => {
                write!(f, "book with genre `{genre}` and purpose `{purpose}`")
            }
        }
    }
}

/// Repository error for book persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Caller-supplied fields were rejected at the boundary.
    #[error(transparent)]
    Validation(#[from] BookValidationError),
    #[error("{0} not found")]
    NotFound(Lookup),
    /// Read or write failure reported by the store.
    #[error("storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Capability interface for the book catalog.
///
/// Production code uses `SqliteBookRepository`; tests and embedders may use
/// `InMemoryBookRepository`. Both honor the same contract.
pub trait BookRepository {
    /// Persists `book` and returns it with the assigned id.
    fn create(&self, book: &NewBook) -> RepoResult<Book>;

    /// Returns every book in ascending id order. An empty catalog is `Ok`.
    fn get_all(&self) -> RepoResult<Vec<Book>>;

    fn get_by_id(&self, id: BookId) -> RepoResult<Book>;

    /// Applies the supplied patch fields and returns the full updated book.
    ///
    /// An empty patch succeeds and returns the book unchanged.
    fn update(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book>;

    /// Removes the book permanently and returns it as it was before removal.
    fn delete(&self, id: BookId) -> RepoResult<Book>;

    /// Returns one book whose genre and purpose both equal the inputs.
    fn find_by_genre_and_purpose(&self, genre: &str, purpose: &str) -> RepoResult<Book>;

    fn count(&self) -> RepoResult<usize> {
        Ok(self.get_all()?.len())
    }

    /// Inserts all of `books` only when the catalog holds no row.
    ///
    /// The emptiness check and the inserts are atomic: either every book is
    /// written or none is. Returns the created books, empty when skipped.
    fn create_all_if_empty(&self, books: &[NewBook]) -> RepoResult<Vec<Book>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'store> {
    store: &'store Store,
}

impl<'store> SqliteBookRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create(&self, book: &NewBook) -> RepoResult<Book> {
        let id = self.store.with_conn(|conn| insert_book(conn, book))?;

        debug!("event=book_create module=repo status=ok book_id={id}");
        Ok(Book::from_new(id, book.clone()))
    }

    fn get_all(&self) -> RepoResult<Vec<Book>> {
        self.store.with_conn(|conn| -> RepoResult<Vec<Book>> {
            let mut stmt = conn.prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
            let books = stmt
                .query_map([], parse_book_row)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(books)
        })
    }

    fn get_by_id(&self, id: BookId) -> RepoResult<Book> {
        self.store
            .with_conn(|conn| select_book(conn, id))?
            .ok_or(RepoError::NotFound(Lookup::Id(id)))
    }

    fn update(&self, id: BookId, patch: &BookPatch) -> RepoResult<Book> {
        let book = self.store.with_conn(|conn| -> RepoResult<Book> {
            let tx = conn.transaction()?;
            let mut book = select_book(&tx, id)?.ok_or(RepoError::NotFound(Lookup::Id(id)))?;

            let fields = patch.present_fields();
            if !fields.is_empty() {
                let assignments = fields
                    .iter()
                    .enumerate()
                    .map(|(index, (column, _))| format!("{column} = ?{}", index + 1))
                    .collect::<Vec<_>>()
                    .join(", ");
                let sql = format!(
                    "UPDATE books SET {assignments} WHERE id = ?{};",
                    fields.len() + 1
                );

                let mut bind_values: Vec<Value> = fields
                    .iter()
                    .map(|(_, value)| Value::Text((*value).to_string()))
                    .collect();
                bind_values.push(Value::Integer(id));

                tx.execute(&sql, params_from_iter(bind_values))?;
                patch.apply_to(&mut book);
            }

            tx.commit()?;
            Ok(book)
        })?;

        debug!(
            "event=book_update module=repo status=ok book_id={id} fields={}",
            patch.present_fields().len()
        );
        Ok(book)
    }

    fn delete(&self, id: BookId) -> RepoResult<Book> {
        let book = self.store.with_conn(|conn| -> RepoResult<Book> {
            let tx = conn.transaction()?;
            let book = select_book(&tx, id)?.ok_or(RepoError::NotFound(Lookup::Id(id)))?;
            tx.execute("DELETE FROM books WHERE id = ?1;", [id])?;
            tx.commit()?;
            Ok(book)
        })?;

        info!("event=book_delete module=repo status=ok book_id={id}");
        Ok(book)
    }

    fn find_by_genre_and_purpose(&self, genre: &str, purpose: &str) -> RepoResult<Book> {
        let found = self.store.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "{BOOK_SELECT_SQL}
                     WHERE genre = ?1
                       AND purpose = ?2
                     ORDER BY id ASC
                     LIMIT 1;"
                ),
                params![genre, purpose],
                parse_book_row,
            )
            .optional()
        })?;

        found.ok_or_else(|| {
            RepoError::NotFound(Lookup::GenreAndPurpose {
                genre: genre.to_string(),
                purpose: purpose.to_string(),
            })
        })
    }

    fn count(&self) -> RepoResult<usize> {
        let count = self.store.with_conn(|conn| count_books(conn))?;
        Ok(count)
    }

    fn create_all_if_empty(&self, books: &[NewBook]) -> RepoResult<Vec<Book>> {
        self.store.with_conn(|conn| -> RepoResult<Vec<Book>> {
            // IMMEDIATE takes the write lock before the count, so two
            // processes cannot both observe an empty table.
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            if count_books(&tx)? > 0 {
                return Ok(Vec::new());
            }

            let mut created = Vec::with_capacity(books.len());
            for book in books {
                let id = insert_book(&tx, book)?;
                created.push(Book::from_new(id, book.clone()));
            }
            tx.commit()?;
            Ok(created)
        })
    }
}

fn insert_book(conn: &Connection, book: &NewBook) -> rusqlite::Result<BookId> {
    conn.execute(
        "INSERT INTO books (
            title,
            author,
            genre,
            purpose,
            description
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            book.title.as_str(),
            book.author.as_str(),
            book.genre.as_str(),
            book.purpose.as_str(),
            book.description.as_str(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn count_books(conn: &Connection) -> rusqlite::Result<usize> {
    let count = conn.query_row("SELECT COUNT(*) FROM books;", [], |row| row.get::<_, i64>(0))?;
    Ok(count.max(0) as usize)
}

fn select_book(conn: &Connection, id: BookId) -> RepoResult<Option<Book>> {
    let book = conn
        .query_row(
            &format!("{BOOK_SELECT_SQL} WHERE id = ?1;"),
            [id],
            parse_book_row,
        )
        .optional()?;
    Ok(book)
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        genre: row.get("genre")?,
        purpose: row.get("purpose")?,
        description: row.get("description")?,
    })
}
