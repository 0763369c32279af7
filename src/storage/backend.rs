//! Persistence medium abstraction.
//!
//! This module defines the [`Storage`] trait: a synchronous key-value slot store
//! that the favorites store reads once during hydration and overwrites wholesale
//! after every change. Keeping the trait this small lets a browser-style local
//! store, a JSON file directory and an in-process map all stand in for each other.
//!
//! A host with no medium at all does not implement the trait; it builds the
//! store with [`crate::favorites::FavoritesStore::in_memory`] instead.

use crate::domain::error::Result;

/// Abstraction over a key-value persistence medium.
///
/// Implementations must be `Send` so a store can move into the worker thread.
///
/// # Implementations
///
/// - [`FileStorage`](crate::storage::FileStorage): one JSON file per key, atomic writes
/// - [`MemoryStorage`](crate::storage::MemoryStorage): process-local map
///
/// # Examples
///
/// ```
/// use flicklist::storage::{MemoryStorage, Storage};
///
/// let mut storage = MemoryStorage::new();
/// storage.write("movieFavorites", "[]")?;
/// assert_eq!(storage.read("movieFavorites")?.as_deref(), Some("[]"));
/// # Ok::<(), flicklist::FlicklistError>(())
/// ```
pub trait Storage: Send {
    /// Reads the serialized record stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been written under that key yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium rejects the write (quota, permissions,
    /// disk full).
    fn write(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}
