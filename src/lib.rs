pub mod book;
mod clock;
pub mod collection;
mod error;
pub mod storage;

pub use book::{Book, BookFormData, IdGenerator, ParseStatusError, ReadingStatus, UuidGenerator};
pub use clock::{Clock, FixedClock, SystemClock};
pub use collection::{CollectionEvent, CollectionStore, LoadOutcome, ReadingStats, StoreConfig};
pub use error::{StorageError, StoreError};
pub use storage::{FileStorage, InMemoryStorage, Storage};

// Listener callbacks registered through `CollectionStore::on` run on this emitter
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
