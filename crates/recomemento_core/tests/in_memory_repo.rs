mod common;

use recomemento_core::{BookRepository, InMemoryBookRepository};

#[test]
fn create_and_get_roundtrip() {
    common::assert_create_then_get_roundtrips(&InMemoryBookRepository::new());
}

#[test]
fn missing_id_is_not_found_for_every_lookup() {
    common::assert_missing_id_is_not_found(&InMemoryBookRepository::new());
}

#[test]
fn empty_patch_returns_unchanged_book() {
    common::assert_empty_patch_is_noop(&InMemoryBookRepository::new());
}

#[test]
fn title_patch_changes_only_title() {
    common::assert_patch_changes_only_supplied_fields(&InMemoryBookRepository::new());
}

#[test]
fn delete_returns_prior_state_and_removes_row() {
    common::assert_delete_returns_prior_state_and_removes(&InMemoryBookRepository::new());
}

#[test]
fn recommendation_scenario_matches_sqlite_semantics() {
    common::assert_recommendation_scenario(&InMemoryBookRepository::new());
}

#[test]
fn ids_are_monotonic_across_deletes() {
    let repo = InMemoryBookRepository::default();
    let first = repo
        .create(&common::new_book("A", "Fiction", "Entertainment"))
        .unwrap();
    repo.delete(first.id).unwrap();
    let second = repo
        .create(&common::new_book("B", "Fiction", "Entertainment"))
        .unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}
