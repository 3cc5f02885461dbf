//! Integration tests for CollectionStore CRUD and status/progress derivation.

#[path = "../support/mod.rs"]
mod support;

use book_tracker::{Book, BookFormData, ReadingStatus, Storage, StoreError};
use support::{date, empty_store, store_on, today};

fn persisted(storage: &impl Storage) -> Vec<Book> {
    let raw = storage.read("books").unwrap().expect("collection persisted");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn added_book_is_retrievable() {
    let (store, storage) = empty_store();

    let added = store
        .add(
            BookFormData::new("The Left Hand of Darkness", "Ursula K. Le Guin")
                .with_genre("Science Fiction")
                .with_page_count(304)
                .with_notes("Book club pick"),
        )
        .unwrap();

    assert!(!added.id.is_empty());
    assert_eq!(added.status, ReadingStatus::WantToRead);
    assert_eq!(store.get(&added.id).unwrap(), Some(added.clone()));
    assert_eq!(persisted(&storage), vec![added]);
}

#[test]
fn caller_supplied_id_is_kept() {
    let (store, _) = empty_store();
    let added = store
        .add(BookFormData::new("Emma", "Jane Austen").with_id("emma"))
        .unwrap();
    assert_eq!(added.id, "emma");
    assert!(store.get("emma").unwrap().is_some());
}

#[test]
fn reading_sets_start_date_once() {
    let (store, _) = empty_store();
    let book = store.add(BookFormData::new("Dune", "Herbert")).unwrap();
    assert_eq!(book.start_date, None);

    let reading = store
        .update_status(&book.id, ReadingStatus::Reading, None)
        .unwrap();
    assert_eq!(reading.status, ReadingStatus::Reading);
    assert_eq!(reading.start_date, Some(today()));

    let mut edited = reading.clone();
    edited.start_date = Some(date(2024, 1, 1));
    store.update(edited).unwrap();

    let again = store
        .update_status(&book.id, ReadingStatus::Reading, None)
        .unwrap();
    assert_eq!(again.start_date, Some(date(2024, 1, 1)));
}

#[test]
fn completing_sets_end_date_only_if_unset() {
    let (store, _) = empty_store();
    let book = store
        .add(BookFormData::new("Dune", "Herbert").with_end_date(date(2023, 12, 31)))
        .unwrap();

    let completed = store
        .update_status(&book.id, ReadingStatus::Completed, None)
        .unwrap();
    assert_eq!(completed.status, ReadingStatus::Completed);
    assert_eq!(completed.end_date, Some(date(2023, 12, 31)));

    let fresh = store.add(BookFormData::new("Emma", "Austen")).unwrap();
    let completed = store
        .update_status(&fresh.id, ReadingStatus::Completed, None)
        .unwrap();
    assert_eq!(completed.end_date, Some(today()));
}

#[test]
fn explicit_end_date_wins() {
    let (store, _) = empty_store();
    let book = store.add(BookFormData::new("Dune", "Herbert")).unwrap();
    store
        .update_status(&book.id, ReadingStatus::Completed, None)
        .unwrap();

    let backdated = store
        .update_status(&book.id, ReadingStatus::Completed, Some(date(2024, 8, 1)))
        .unwrap();
    assert_eq!(backdated.end_date, Some(date(2024, 8, 1)));
    assert_eq!(
        store.get(&book.id).unwrap().unwrap().end_date,
        Some(date(2024, 8, 1))
    );
}

#[test]
fn progress_moves_book_to_reading() {
    let (store, _) = empty_store();
    let book = store
        .add(BookFormData::new("Dune", "Herbert").with_page_count(412))
        .unwrap();

    let progressed = store.update_progress(&book.id, 57).unwrap();
    assert_eq!(progressed.status, ReadingStatus::Reading);
    assert_eq!(progressed.current_page, Some(57));
    assert_eq!(progressed.start_date, Some(today()));
    assert_eq!(progressed.end_date, None);
    assert_eq!(progressed.progress_percent(), Some(13));
}

#[test]
fn progress_at_page_count_completes() {
    let (store, _) = empty_store();
    let book = store
        .add(BookFormData::new("Dune", "Herbert").with_page_count(300))
        .unwrap();
    store.update_progress(&book.id, 10).unwrap();

    let done = store.update_progress(&book.id, 320).unwrap();
    assert_eq!(done.status, ReadingStatus::Completed);
    assert_eq!(done.current_page, Some(300));
    assert_eq!(done.end_date, Some(today()));
    assert_eq!(store.get(&book.id).unwrap(), Some(done));
}

#[test]
fn delete_removes_exactly_one() {
    let (store, storage) = empty_store();
    let keep = store.add(BookFormData::new("Emma", "Austen")).unwrap();
    let doomed = store.add(BookFormData::new("Dune", "Herbert")).unwrap();
    assert_eq!(store.len().unwrap(), 2);

    assert!(store.delete(&doomed.id).unwrap());
    assert_eq!(store.get(&doomed.id).unwrap(), None);
    assert_eq!(store.len().unwrap(), 1);
    assert_eq!(persisted(&storage), vec![keep]);

    assert!(!store.delete(&doomed.id).unwrap());
    assert_eq!(store.len().unwrap(), 1);
}

#[test]
fn update_of_unknown_id_changes_nothing() {
    let (store, storage) = empty_store();
    store.add(BookFormData::new("Emma", "Austen")).unwrap();
    let books_before = store.books().unwrap();
    let stored_before = storage.read("books").unwrap();

    let ghost = Book::from_form("ghost", BookFormData::new("Ghost", "Nobody"));
    let err = store.update(ghost).unwrap_err();

    assert!(matches!(err, StoreError::NotFound { ref id } if id == "ghost"));
    assert_eq!(store.books().unwrap(), books_before);
    assert_eq!(storage.read("books").unwrap(), stored_before);
}

#[test]
fn update_replaces_in_place() {
    let (store, _) = empty_store();
    let first = store.add(BookFormData::new("Emma", "Austen")).unwrap();
    store.add(BookFormData::new("Dune", "Herbert")).unwrap();

    let mut edited = first.clone();
    edited.rating = Some(4);
    edited.notes = Some("Funnier than expected".into());
    store.update(edited.clone()).unwrap();

    let books = store.books().unwrap();
    assert_eq!(books[0], edited);
    assert_eq!(books[1].title, "Dune");
}

#[test]
fn shelves_and_stats() {
    let (store, _) = empty_store();
    let a = store
        .add(BookFormData::new("A", "X").with_page_count(100))
        .unwrap();
    let b = store
        .add(BookFormData::new("B", "Y").with_page_count(200))
        .unwrap();
    store.add(BookFormData::new("C", "Z")).unwrap();

    store.update_progress(&a.id, 100).unwrap();
    store.update_progress(&b.id, 50).unwrap();
    let mut rated = store.get(&a.id).unwrap().unwrap();
    rated.rating = Some(4);
    store.update(rated).unwrap();

    let reading: Vec<_> = store
        .by_status(ReadingStatus::Reading)
        .unwrap()
        .into_iter()
        .map(|book| book.title)
        .collect();
    assert_eq!(reading, vec!["B"]);

    let stats = store.stats().unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.reading, 1);
    assert_eq!(stats.want_to_read, 1);
    assert_eq!(stats.pages_read, 150);
    assert_eq!(stats.average_rating, Some(4.0));
}

#[test]
fn dune_end_to_end() {
    let (store, storage) = empty_store();

    let dune = store
        .add(BookFormData::new("Dune", "Herbert").with_page_count(412))
        .unwrap();
    assert!(!dune.id.is_empty());
    assert_eq!(persisted(&storage), vec![dune.clone()]);

    let finished = store.update_progress(&dune.id, 412).unwrap();
    assert_eq!(finished.status, ReadingStatus::Completed);
    assert_eq!(finished.end_date, Some(today()));
    assert_eq!(persisted(&storage), vec![finished]);
}

#[test]
fn rereading_records_the_new_finish_date() {
    let (store, storage) = empty_store();
    let dune = store
        .add(BookFormData::new("Dune", "Herbert").with_page_count(412))
        .unwrap();
    store
        .update_status(&dune.id, ReadingStatus::Completed, Some(date(2024, 1, 20)))
        .unwrap();

    let reopened = store_on(storage.clone(), today());
    let reread = reopened.update_progress(&dune.id, 10).unwrap();
    assert_eq!(reread.status, ReadingStatus::Reading);
    assert_eq!(reread.end_date, None);

    let finished = reopened.update_progress(&dune.id, 412).unwrap();
    assert_eq!(finished.status, ReadingStatus::Completed);
    assert_eq!(finished.end_date, Some(today()));

    let later = date(2024, 10, 2);
    let next_day = store_on(storage.clone(), later);
    next_day.update_progress(&dune.id, 100).unwrap();
    let again = next_day.update_progress(&dune.id, 412).unwrap();
    assert_eq!(again.end_date, Some(later));
    assert_eq!(persisted(&storage), vec![again]);
}

#[test]
fn handles_share_one_collection() {
    let (store, _) = empty_store();
    let other = store.clone();

    let book = store.add(BookFormData::new("Emma", "Austen")).unwrap();
    assert_eq!(other.get(&book.id).unwrap(), Some(book));
}

#[test]
fn concurrent_adds_are_all_kept() {
    let (store, storage) = empty_store();

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let store = store.clone();
            std::thread::spawn(move || {
                for i in 0..10 {
                    store
                        .add(BookFormData::new(format!("Book {}-{}", n, i), "Anon"))
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len().unwrap(), 80);
    assert_eq!(persisted(&storage).len(), 80);
}
