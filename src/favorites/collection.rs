//! Insertion-ordered movie map keyed by id.
//!
//! Every movie gets a monotonically increasing slot number when inserted. The
//! slot map keeps iteration in insertion order and the id index gives constant
//! time membership checks, so removal never has to scan the list.

use crate::domain::{Movie, MovieId};
use std::collections::{BTreeMap, HashMap};

/// Ordered collection holding at most one movie per id.
#[derive(Debug, Clone, Default)]
pub struct FavoritesCollection {
    slots: BTreeMap<u64, Movie>,
    index: HashMap<MovieId, u64>,
    next_slot: u64,
}

impl FavoritesCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from movies in order; the first occurrence of an id wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use flicklist::favorites::FavoritesCollection;
    /// use flicklist::Movie;
    ///
    /// let collection = FavoritesCollection::from_movies(vec![
    ///     Movie::new(1, "first"),
    ///     Movie::new(2, "other"),
    ///     Movie::new(1, "duplicate"),
    /// ]);
    /// assert_eq!(collection.len(), 2);
    /// assert_eq!(collection.get(1).unwrap().title, "first");
    /// ```
    #[must_use]
    pub fn from_movies(movies: impl IntoIterator<Item = Movie>) -> Self {
        let mut collection = Self::new();
        for movie in movies {
            collection.insert(movie);
        }
        collection
    }

    /// Appends `movie` unless its id is already present.
    ///
    /// Returns `true` if the movie was inserted.
    pub fn insert(&mut self, movie: Movie) -> bool {
        if self.index.contains_key(&movie.id) {
            return false;
        }
        let slot = self.next_slot;
        self.next_slot += 1;
        self.index.insert(movie.id, slot);
        self.slots.insert(slot, movie);
        true
    }

    /// Removes the movie with `id`, returning it if it was present.
    pub fn remove(&mut self, id: MovieId) -> Option<Movie> {
        let slot = self.index.remove(&id)?;
        self.slots.remove(&slot)
    }

    /// Returns `true` if a movie with `id` is present.
    #[must_use]
    pub fn contains(&self, id: MovieId) -> bool {
        self.index.contains_key(&id)
    }

    /// Returns the movie with `id`, if present.
    #[must_use]
    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.index.get(&id).and_then(|slot| self.slots.get(slot))
    }

    /// Iterates movies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.slots.values()
    }

    /// Number of movies held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the collection holds no movies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Clones the movies out in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Movie> {
        self.iter().cloned().collect()
    }

    /// Removes every movie.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.index.clear();
    }
}

impl PartialEq for FavoritesCollection {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}
