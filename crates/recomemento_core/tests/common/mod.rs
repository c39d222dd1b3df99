//! Shared fixtures and repository contract checks for integration tests.

#![allow(dead_code)]

use recomemento_core::{BookPatch, BookRepository, NewBook};

pub fn new_book(title: &str, genre: &str, purpose: &str) -> NewBook {
    NewBook::new(
        title,
        format!("{title} Author"),
        genre,
        purpose,
        format!("Description of {title}"),
    )
}

/// Two Fiction/Entertainment, one Technology/Learning, one Business/Learning.
pub fn scenario_books() -> Vec<NewBook> {
    vec![
        new_book("Gatsby", "Fiction", "Entertainment"),
        new_book("Clean Code", "Technology", "Learning"),
        new_book("1984", "Fiction", "Entertainment"),
        new_book("Lean Startup", "Business", "Learning"),
    ]
}

pub fn assert_create_then_get_roundtrips(repo: &impl BookRepository) {
    let input = new_book("吾輩は猫である", "Fiction", "Entertainment");
    let created = repo.create(&input).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.to_new(), input);

    let loaded = repo.get_by_id(created.id).unwrap();
    assert_eq!(loaded, created);
}

pub fn assert_missing_id_is_not_found(repo: &impl BookRepository) {
    let missing = 9_999;
    assert!(repo.get_by_id(missing).unwrap_err().is_not_found());
    assert!(repo
        .update(missing, &BookPatch::default().with_title("X"))
        .unwrap_err()
        .is_not_found());
    assert!(repo.update(missing, &BookPatch::default()).unwrap_err().is_not_found());
    assert!(repo.delete(missing).unwrap_err().is_not_found());
}

pub fn assert_empty_patch_is_noop(repo: &impl BookRepository) {
    let created = repo.create(&new_book("Dune", "Fiction", "Entertainment")).unwrap();
    let updated = repo.update(created.id, &BookPatch::default()).unwrap();
    assert_eq!(updated, created);
    assert_eq!(repo.get_by_id(created.id).unwrap(), created);
}

pub fn assert_patch_changes_only_supplied_fields(repo: &impl BookRepository) {
    let created = repo.create(&new_book("Dune", "Fiction", "Entertainment")).unwrap();
    let updated = repo
        .update(created.id, &BookPatch::default().with_title("X"))
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "X");
    assert_eq!(updated.author, created.author);
    assert_eq!(updated.genre, created.genre);
    assert_eq!(updated.purpose, created.purpose);
    assert_eq!(updated.description, created.description);
    assert_eq!(repo.get_by_id(created.id).unwrap(), updated);
}

pub fn assert_delete_returns_prior_state_and_removes(repo: &impl BookRepository) {
    let created = repo.create(&new_book("Dune", "Fiction", "Entertainment")).unwrap();
    let deleted = repo.delete(created.id).unwrap();
    assert_eq!(deleted, created);
    assert!(repo.get_by_id(created.id).unwrap_err().is_not_found());
    assert!(repo.delete(created.id).unwrap_err().is_not_found());
}

pub fn assert_recommendation_scenario(repo: &impl BookRepository) {
    for book in scenario_books() {
        repo.create(&book).unwrap();
    }

    let technology = repo
        .find_by_genre_and_purpose("Technology", "Learning")
        .unwrap();
    assert_eq!(technology.title, "Clean Code");

    let fiction = repo
        .find_by_genre_and_purpose("Fiction", "Entertainment")
        .unwrap();
    assert_eq!(fiction.genre, "Fiction");
    assert_eq!(fiction.purpose, "Entertainment");

    assert!(repo
        .find_by_genre_and_purpose("fiction", "entertainment")
        .unwrap_err()
        .is_not_found());
    assert!(repo
        .find_by_genre_and_purpose("Technology", "Entertainment")
        .unwrap_err()
        .is_not_found());

    let all = repo.get_all().unwrap();
    assert_eq!(all.len(), 4);
    repo.delete(all[0].id).unwrap();
    assert_eq!(repo.get_all().unwrap().len(), 3);
    assert_eq!(repo.count().unwrap(), 3);
}
