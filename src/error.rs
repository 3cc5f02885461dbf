use thiserror::Error;

/// Error type for durable storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed to read or write its medium.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The persisted collection could not be encoded or decoded.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// The underlying lock was poisoned (a thread panicked while holding it).
    #[error("storage lock poisoned during {0}")]
    Poisoned(&'static str),
    /// The key cannot be mapped onto the backend (e.g. contains a path separator).
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Error type for collection store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store has not finished loading its initial collection.
    #[error("collection store is not ready")]
    NotReady,
    /// No book with the given id exists in the collection.
    #[error("book not found: {id}")]
    NotFound { id: String },
    /// A caller-supplied id is already taken by another book.
    #[error("book id already in use: {id}")]
    DuplicateId { id: String },
    /// Id generation kept producing ids that were already taken.
    #[error("could not generate a unique book id after {attempts} attempts")]
    IdExhausted { attempts: usize },
    #[error("collection lock poisoned during {0}")]
    LockPoisoned(&'static str),
    /// Durable storage failed. Only surfaced by explicit flushes.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    pub(crate) fn not_found(id: &str) -> Self {
        StoreError::NotFound { id: id.to_string() }
    }
}
