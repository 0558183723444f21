//!
//! Durable key-value surface for the session record.
//!
//! The store only ever reads one key at startup (or on `rehydrate`) and overwrites it
//! in full after each mutation, so the contract is deliberately small.

use crate::error::StorageError;

/// Trait for a key-value backend holding serialized session records.
pub trait SessionStorage {
    /// Returns the value stored under `key`, or `None` if nothing was ever written.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value stored under `key`.
    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: SessionStorage + ?Sized> SessionStorage for Box<S> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

// In-process backend, used by tests and by hosts without a disk.
pub mod memory;

pub use memory::MemoryStorage;

// One JSON file per key inside a directory.
pub mod file;

pub use file::FileStorage;
