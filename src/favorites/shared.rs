//! Mutex-serialized favorites store for multi-threaded hosts.
//!
//! Read-modify-write sequences such as "add unless present" are not atomic
//! across threads, so every operation here takes the same lock for its whole
//! duration. Hosts that prefer message passing can use
//! [`crate::worker::FavoritesWorker`] instead.

use crate::domain::error::{FlicklistError, Result};
use crate::domain::{Movie, MovieId};
use crate::favorites::store::{FavoritesStore, StoreEvent, SubscriptionId};
use crate::storage::Storage;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable, thread-safe handle to a [`FavoritesStore`].
///
/// # Examples
///
/// ```
/// use flicklist::favorites::{FavoritesStore, SharedFavorites};
/// use flicklist::Movie;
///
/// let shared = SharedFavorites::new(FavoritesStore::in_memory());
/// shared.hydrate()?;
///
/// let handle = shared.clone();
/// std::thread::spawn(move || handle.add(Movie::new(1, "Ran")))
///     .join()
///     .unwrap()?;
///
/// assert!(shared.contains(1)?);
/// # Ok::<(), flicklist::FlicklistError>(())
/// ```
pub struct SharedFavorites<S = Box<dyn Storage>> {
    inner: Arc<Mutex<FavoritesStore<S>>>,
}

impl<S> Clone for SharedFavorites<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: Storage> SharedFavorites<S> {
    /// Wraps `store` for shared use.
    #[must_use]
    pub fn new(store: FavoritesStore<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, FavoritesStore<S>>> {
        self.inner
            .lock()
            .map_err(|e| FlicklistError::Lock(e.to_string()))
    }

    /// Runs `f` with exclusive access to the store.
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn with<T>(&self, f: impl FnOnce(&mut FavoritesStore<S>) -> T) -> Result<T> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// See [`FavoritesStore::hydrate`].
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn hydrate(&self) -> Result<usize> {
        self.with(|store| store.hydrate())
    }

    /// See [`FavoritesStore::is_loading`].
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn is_loading(&self) -> Result<bool> {
        self.with(|store| store.is_loading())
    }

    /// See [`FavoritesStore::add`].
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn add(&self, movie: Movie) -> Result<bool> {
        self.with(|store| store.add(movie))
    }

    /// See [`FavoritesStore::add_many`].
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn add_many(&self, movies: Vec<Movie>) -> Result<bool> {
        self.with(|store| store.add_many(movies))
    }

    /// See [`FavoritesStore::remove`].
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn remove(&self, id: MovieId) -> Result<bool> {
        self.with(|store| store.remove(id))
    }

    /// See [`FavoritesStore::remove_many`].
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn remove_many(&self, ids: &[MovieId]) -> Result<bool> {
        self.with(|store| store.remove_many(ids))
    }

    /// See [`FavoritesStore::contains`].
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn contains(&self, id: MovieId) -> Result<bool> {
        self.with(|store| store.contains(id))
    }

    /// See [`FavoritesStore::list`].
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn list(&self) -> Result<Vec<Movie>> {
        self.with(|store| store.list())
    }

    /// See [`FavoritesStore::subscribe`].
    ///
    /// The listener runs while the store lock is held. Calling back into this
    /// handle (or a clone) from inside the listener deadlocks; send the event
    /// elsewhere and act on it after the mutating call returns.
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Lock`] if the lock is poisoned.
    pub fn subscribe(
        &self,
        listener: impl Fn(&StoreEvent) + Send + 'static,
    ) -> Result<SubscriptionId> {
        self.with(|store| store.subscribe(listener))
    }
}
