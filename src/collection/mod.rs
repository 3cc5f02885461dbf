//! Collection - the reading collection store.
//!
//! [`CollectionStore`] owns the in-memory list of books, mirrors it into a
//! [`Storage`](crate::storage::Storage) slot after every mutation, and applies
//! the status/progress derivation rules so callers never build inconsistent
//! records.
//!
//! ## Example
//!
//! ```ignore
//! use book_tracker::{BookFormData, CollectionStore, FileStorage, ReadingStatus};
//!
//! let store = CollectionStore::open(FileStorage::new("./data"))?;
//! let dune = store.add(BookFormData::new("Dune", "Frank Herbert").with_page_count(412))?;
//! store.update_progress(&dune.id, 120)?;
//! store.update_status(&dune.id, ReadingStatus::Completed, None)?;
//! ```

mod config;
mod events;
mod stats;
mod store;

pub use config::StoreConfig;
pub use events::CollectionEvent;
pub use stats::ReadingStats;
pub use store::{CollectionStore, LoadOutcome};
