//!
//! In-memory implementation of `SessionStorage`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::SessionStorage;
use crate::error::StorageError;

/// A `SessionStorage` backed by a shared `HashMap`.
///
/// Clones share the same records, the way two windows share one browser profile:
/// a write through one clone is visible to `load` through every other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    records: Arc<Mutex<HashMap<String, String>>>,
    /// When true, every write through this handle returns a simulated failure.
    pub fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose writes always fail.
    pub fn new_failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Seeds a record, e.g. one written by a previous process.
    pub fn with_record(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let Ok(mut records) = self.records.lock() {
            records.insert(key.into(), value.into());
        }
        self
    }

    /// Raw access to a stored value.
    pub fn get(&self, key: &str) -> Option<String> {
        self.records.lock().ok()?.get(key).cloned()
    }

    fn records(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.records
            .lock()
            .map_err(|_| StorageError::Backend("memory storage lock poisoned".to_string()))
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Backend(
                "Mock storage error: simulated write failure".to_string(),
            ));
        }
        Ok(())
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records()?.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.records()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        self.records()?.remove(key);
        Ok(())
    }
}
