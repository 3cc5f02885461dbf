//! Helpers shared by the integration suites.
#![allow(dead_code)]


use book_tracker::{CollectionStore, FixedClock, InMemoryStorage, StoreConfig};
use chrono::NaiveDate;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 15).unwrap()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A loaded store over `storage` starting from an empty collection, pinned to `on`.
pub fn store_on(storage: InMemoryStorage, on: NaiveDate) -> CollectionStore<InMemoryStorage> {
    let store = CollectionStore::new(storage)
        .with_config(StoreConfig::new().with_seed_when_empty(false))
        .with_clock(FixedClock::new(on));
    store.load().unwrap();
    store
}

/// A loaded store starting from an empty collection, pinned to `today()`.
pub fn empty_store() -> (CollectionStore<InMemoryStorage>, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    (store_on(storage.clone(), today()), storage)
}
