//! Process-local persistence medium.

use crate::domain::error::{FlicklistError, Result};
use crate::storage::backend::Storage;
use std::collections::HashMap;

/// In-memory key-value medium.
///
/// Useful for hosts that want persistence semantics without durability, and for
/// tests: writes can be made to fail on demand and every attempted write is
/// counted.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    fail_writes: bool,
    write_attempts: usize,
}

impl MemoryStorage {
    /// Creates an empty medium.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a medium pre-seeded with one record.
    ///
    /// # Examples
    ///
    /// ```
    /// use flicklist::storage::{MemoryStorage, Storage};
    ///
    /// let storage = MemoryStorage::with_record("movieFavorites", "not json");
    /// assert_eq!(storage.read("movieFavorites")?.as_deref(), Some("not json"));
    /// # Ok::<(), flicklist::FlicklistError>(())
    /// ```
    #[must_use]
    pub fn with_record(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::default();
        storage.slots.insert(key.into(), value.into());
        storage
    }

    /// Makes every subsequent write fail, as a full quota would.
    #[must_use]
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Number of writes attempted so far, including failed ones.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.write_attempts
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        self.write_attempts += 1;
        if self.fail_writes {
            return Err(FlicklistError::Storage("quota exceeded".to_string()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
