//! Baseline catalog seeding.
//!
//! # Invariants
//! - Seeding only runs against an empty `books` table; a catalog holding
//!   any row is left untouched.
//! - The emptiness check and the inserts are one atomic step: a failed
//!   seed leaves the table empty so the next start retries it.
//! - Rows are written through the repository, never with raw SQL.

use crate::db::Store;
use crate::model::book::NewBook;
use crate::repo::book_repo::{BookRepository, RepoResult, SqliteBookRepository};
use log::{info, warn};

/// Fixed set of books written into a fresh catalog.
pub fn baseline_books() -> Vec<NewBook> {
    vec![
        NewBook::new(
            "The Great Gatsby",
            "F. Scott Fitzgerald",
            "Fiction",
            "Entertainment",
            "A story of the fabulously wealthy Jay Gatsby and his love for the beautiful Daisy Buchanan.",
        ),
        NewBook::new(
            "Clean Code",
            "Robert C. Martin",
            "Technology",
            "Learning",
            "A handbook of agile software craftsmanship that teaches principles of writing clean, readable code.",
        ),
        NewBook::new(
            "1984",
            "George Orwell",
            "Fiction",
            "Entertainment",
            "A dystopian social science fiction novel that follows Winston Smith, a low-ranking citizen of Oceania.",
        ),
        NewBook::new(
            "The Lean Startup",
            "Eric Ries",
            "Business",
            "Learning",
            "A methodology for developing businesses and products that aims to shorten product development cycles.",
        ),
    ]
}

/// Inserts `baseline_books()` when the catalog is empty.
///
/// Returns the number of books written, `0` when seeding was skipped.
pub fn seed_if_empty(store: &Store) -> RepoResult<usize> {
    seed_repository(&SqliteBookRepository::new(store))
}

/// Repository-generic form of `seed_if_empty`.
pub fn seed_repository(repo: &impl BookRepository) -> RepoResult<usize> {
    let created = match repo.create_all_if_empty(&baseline_books()) {
        Ok(created) => created,
        Err(err) => {
            warn!("event=db_seed module=seed status=error error={err}");
            return Err(err);
        }
    };

    if created.is_empty() {
        info!("event=db_seed module=seed status=skipped");
    } else {
        info!("event=db_seed module=seed status=ok inserted={}", created.len());
    }
    Ok(created.len())
}
