//! Storage - durable key-value slots for persisted collections.
//!
//! A [`Storage`] holds whole serialized values under string keys. The
//! collection store writes its entire book list into one slot on every
//! mutation, so backends only need atomic whole-value replacement.
//!
//! - [`InMemoryStorage`] keeps values in a shared `HashMap` (tests, scratch use)
//! - [`FileStorage`] keeps one `<key>.json` file per key in a directory

mod file;
mod in_memory;

use crate::error::StorageError;

/// Abstract whole-value key-value storage.
pub trait Storage: Send + Sync {
    /// Read the value stored under `key`. Returns None if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value stored under `key`. Returns true if one existed.
    fn remove(&self, key: &str) -> Result<bool, StorageError>;
}

impl<S: Storage + ?Sized> Storage for std::sync::Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<bool, StorageError> {
        (**self).remove(key)
    }
}

pub use file::FileStorage;
pub use in_memory::InMemoryStorage;
