use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "emitter")]
use std::sync::Mutex;

use chrono::NaiveDate;
#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;
use tracing::{debug, error, info, warn};

use crate::book::transition::{apply_progress, apply_status, reconcile};
use crate::book::{sample_books, Book, BookFormData, IdGenerator, ReadingStatus, UuidGenerator};
use crate::clock::{Clock, SystemClock};
use crate::error::{StorageError, StoreError};
use crate::storage::Storage;

use super::{CollectionEvent, ReadingStats, StoreConfig};

/// How the initial collection was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A persisted collection was found and adopted.
    Restored { count: usize },
    /// Nothing was persisted; the starting shelf was created and written.
    Seeded { count: usize },
    /// Persisted data could not be read. The sample shelf is used in memory
    /// and durable storage is left as it was.
    Recovered { reason: String },
    /// The store had already been loaded.
    AlreadyLoaded,
}

struct State {
    books: Vec<Book>,
    ready: bool,
    /// Whether durable storage mirrors `books`.
    synced: bool,
}

/// Owner of a reading collection and its single writer to durable storage.
///
/// Cloning a store yields another handle onto the same collection. Every
/// mutation holds the collection's write lock across the change and the
/// durable write, so storage writes are serialized.
pub struct CollectionStore<S> {
    storage: Arc<S>,
    config: Arc<StoreConfig>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    state: Arc<RwLock<State>>,
    #[cfg(feature = "emitter")]
    emitter: Arc<Mutex<EventEmitter>>,
}

impl<S> Clone for CollectionStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            clock: Arc::clone(&self.clock),
            ids: Arc::clone(&self.ids),
            state: Arc::clone(&self.state),
            #[cfg(feature = "emitter")]
            emitter: Arc::clone(&self.emitter),
        }
    }
}

impl<S: Storage> CollectionStore<S> {
    /// Create an unloaded store over `storage`. Call [`load`](Self::load)
    /// before using it.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(storage),
            config: Arc::new(StoreConfig::default()),
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidGenerator),
            state: Arc::new(RwLock::new(State {
                books: Vec::new(),
                ready: false,
                synced: false,
            })),
            #[cfg(feature = "emitter")]
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
        }
    }

    /// Create and load a store with default configuration.
    pub fn open(storage: S) -> Result<Self, StoreError> {
        let store = Self::new(storage);
        store.load()?;
        Ok(store)
    }

    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the initial collection from durable storage.
    ///
    /// Absent data seeds the collection (and persists it); unreadable data
    /// falls back to the sample shelf in memory only.
    pub fn load(&self) -> Result<LoadOutcome, StoreError> {
        let mut state = self.write_state("load")?;
        if state.ready {
            return Ok(LoadOutcome::AlreadyLoaded);
        }

        let key = &self.config.storage_key;
        let outcome = match self.read_persisted() {
            Ok(Some(books)) => {
                let count = books.len();
                state.books = books;
                state.synced = true;
                LoadOutcome::Restored { count }
            }
            Ok(None) => {
                state.books = self.starting_shelf();
                self.persist(&mut state);
                LoadOutcome::Seeded {
                    count: state.books.len(),
                }
            }
            Err(err) => {
                warn!(key = %key, error = %err, "could not read persisted collection, using sample books");
                state.books = sample_books();
                state.synced = false;
                LoadOutcome::Recovered {
                    reason: err.to_string(),
                }
            }
        };
        state.ready = true;

        info!(key = %key, books = state.books.len(), outcome = ?outcome, "collection loaded");
        Ok(outcome)
    }

    /// True once [`load`](Self::load) has completed.
    pub fn is_ready(&self) -> bool {
        self.state.read().map(|state| state.ready).unwrap_or(false)
    }

    /// Whether durable storage holds the current collection.
    pub fn is_synced(&self) -> Result<bool, StoreError> {
        Ok(self.read_ready("is_synced")?.synced)
    }

    /// Look up a book by id.
    pub fn get(&self, id: &str) -> Result<Option<Book>, StoreError> {
        let state = self.read_ready("get")?;
        Ok(state.books.iter().find(|book| book.id == id).cloned())
    }

    /// All books in insertion order.
    pub fn books(&self) -> Result<Vec<Book>, StoreError> {
        Ok(self.read_ready("books")?.books.clone())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read_ready("len")?.books.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    /// Books matching a predicate, in insertion order.
    pub fn find(&self, predicate: impl Fn(&Book) -> bool) -> Result<Vec<Book>, StoreError> {
        let state = self.read_ready("find")?;
        Ok(state
            .books
            .iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect())
    }

    /// The shelf for one reading status.
    pub fn by_status(&self, status: ReadingStatus) -> Result<Vec<Book>, StoreError> {
        self.find(|book| book.status == status)
    }

    /// Case-insensitive substring search over titles and authors.
    pub fn search(&self, query: &str) -> Result<Vec<Book>, StoreError> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.books();
        }
        self.find(|book| {
            book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })
    }

    pub fn stats(&self) -> Result<ReadingStats, StoreError> {
        let state = self.read_ready("stats")?;
        Ok(ReadingStats::from_books(&state.books))
    }

    /// Add a book built from `data`.
    ///
    /// A caller-supplied id must not be taken; otherwise an id is generated.
    /// Dates and status are derived from the initial status and progress.
    pub fn add(&self, data: BookFormData) -> Result<Book, StoreError> {
        let mut state = self.write_ready("add")?;

        let id = match data.id.as_deref() {
            Some(id) if state.books.iter().any(|book| book.id == id) => {
                return Err(StoreError::DuplicateId { id: id.to_string() });
            }
            Some(id) => id.to_string(),
            None => self.generate_id(&state.books)?,
        };

        let mut book = Book::from_form(id, data);
        reconcile(&mut book, self.clock.today());
        state.books.push(book.clone());
        self.persist(&mut state);

        debug!(book_id = %book.id, status = %book.status, "book added");
        self.notify(CollectionEvent::BookAdded { book: book.clone() });
        Ok(book)
    }

    /// Replace the stored record with the same id.
    ///
    /// Unknown ids fail with [`StoreError::NotFound`] and leave the
    /// collection untouched.
    pub fn update(&self, book: Book) -> Result<Book, StoreError> {
        let mut state = self.write_ready("update")?;
        self.replace(&mut state, book)
    }

    /// Remove a book. Returns false (and writes nothing) if it was absent.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut state = self.write_ready("delete")?;
        let Some(index) = state.books.iter().position(|book| book.id == id) else {
            return Ok(false);
        };

        state.books.remove(index);
        self.persist(&mut state);

        debug!(book_id = %id, "book deleted");
        self.notify(CollectionEvent::BookDeleted { id: id.to_string() });
        Ok(true)
    }

    /// Move a book to `status`, stamping start/end dates as needed.
    ///
    /// `end_date` only applies to `Completed`, where it overrides any
    /// existing end date.
    pub fn update_status(
        &self,
        id: &str,
        status: ReadingStatus,
        end_date: Option<NaiveDate>,
    ) -> Result<Book, StoreError> {
        let mut state = self.write_ready("update_status")?;
        let mut book = Self::find_in(&state, id)?;
        apply_status(&mut book, status, end_date, self.clock.today());
        self.replace(&mut state, book)
    }

    /// Record the reader's current page.
    ///
    /// The book becomes `Reading`, or `Completed` once the page reaches a
    /// known page count.
    pub fn update_progress(&self, id: &str, current_page: u32) -> Result<Book, StoreError> {
        let mut state = self.write_ready("update_progress")?;
        let mut book = Self::find_in(&state, id)?;
        apply_progress(&mut book, current_page, self.clock.today());
        self.replace(&mut state, book)
    }

    /// Write the current collection to durable storage, returning any error.
    pub fn flush(&self) -> Result<(), StoreError> {
        let mut state = self.write_ready("flush")?;
        match self.write_collection(&state.books) {
            Ok(()) => {
                state.synced = true;
                Ok(())
            }
            Err(err) => {
                state.synced = false;
                Err(err.into())
            }
        }
    }

    fn find_in(state: &State, id: &str) -> Result<Book, StoreError> {
        state
            .books
            .iter()
            .find(|book| book.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(id))
    }

    fn replace(&self, state: &mut State, book: Book) -> Result<Book, StoreError> {
        let slot = state
            .books
            .iter_mut()
            .find(|existing| existing.id == book.id)
            .ok_or_else(|| StoreError::not_found(&book.id))?;
        *slot = book.clone();
        self.persist(state);

        debug!(book_id = %book.id, status = %book.status, "book updated");
        self.notify(CollectionEvent::BookUpdated { book: book.clone() });
        Ok(book)
    }

    fn generate_id(&self, books: &[Book]) -> Result<String, StoreError> {
        let taken: HashSet<&str> = books.iter().map(|book| book.id.as_str()).collect();
        let attempts = self.config.max_id_attempts.max(1);
        for _ in 0..attempts {
            let candidate = self.ids.next_id();
            if !candidate.is_empty() && !taken.contains(candidate.as_str()) {
                return Ok(candidate);
            }
        }
        Err(StoreError::IdExhausted { attempts })
    }

    fn starting_shelf(&self) -> Vec<Book> {
        if self.config.seed_when_empty {
            sample_books()
        } else {
            Vec::new()
        }
    }

    fn read_persisted(&self) -> Result<Option<Vec<Book>>, StorageError> {
        let Some(raw) = self.storage.read(&self.config.storage_key)? else {
            return Ok(None);
        };
        let books: Vec<Book> = serde_json::from_str(&raw)?;
        Ok(Some(dedupe(books)))
    }

    fn write_collection(&self, books: &[Book]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(books)?;
        self.storage.write(&self.config.storage_key, &raw)
    }

    /// Write-through after a mutation. Failures are logged, not surfaced;
    /// the in-memory collection stays authoritative.
    fn persist(&self, state: &mut State) {
        match self.write_collection(&state.books) {
            Ok(()) => state.synced = true,
            Err(err) => {
                error!(
                    key = %self.config.storage_key,
                    error = %err,
                    "failed to persist collection"
                );
                state.synced = false;
            }
        }
    }

    fn read_state(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn write_state(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn read_ready(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        let state = self.read_state(operation)?;
        if !state.ready {
            return Err(StoreError::NotReady);
        }
        Ok(state)
    }

    fn write_ready(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        let state = self.write_state(operation)?;
        if !state.ready {
            return Err(StoreError::NotReady);
        }
        Ok(state)
    }
}

#[cfg(feature = "emitter")]
impl<S: Storage> CollectionStore<S> {
    /// Register a listener for a [`CollectionEvent`] name. The listener
    /// receives the event as JSON. Returns the listener id.
    ///
    /// Listeners run on background threads after the mutation has been applied.
    pub fn on<F>(&self, event: &str, listener: F) -> Result<String, StoreError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| StoreError::LockPoisoned("on"))?;
        Ok(emitter.on(event, listener))
    }

    /// Remove a listener by id. Returns true if it was registered.
    pub fn remove_listener(&self, listener_id: &str) -> Result<bool, StoreError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| StoreError::LockPoisoned("remove_listener"))?;
        Ok(emitter.remove_listener(listener_id).is_some())
    }

    fn notify(&self, event: CollectionEvent) {
        let payload = match event.to_json() {
            Ok(payload) => payload,
            Err(err) => {
                warn!(event = event.name(), error = %err, "could not encode collection event");
                return;
            }
        };
        let Ok(mut emitter) = self.emitter.lock() else {
            warn!(event = event.name(), "event emitter lock poisoned");
            return;
        };
        emitter.emit(event.name(), payload.clone());
        emitter.emit(CollectionEvent::COLLECTION_CHANGED, payload);
    }
}

#[cfg(not(feature = "emitter"))]
impl<S: Storage> CollectionStore<S> {
    fn notify(&self, _event: CollectionEvent) {}
}

/// Drop records whose id repeats an earlier one.
fn dedupe(books: Vec<Book>) -> Vec<Book> {
    let mut seen = HashSet::new();
    let before = books.len();
    let books: Vec<Book> = books
        .into_iter()
        .filter(|book| seen.insert(book.id.clone()))
        .collect();
    if books.len() != before {
        warn!(dropped = before - books.len(), "dropped books with duplicate ids");
    }
    books
}
