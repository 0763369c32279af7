//! Favorites store: the deduplicated, persisted collection of favorited movies.
//!
//! # Lifecycle
//!
//! ```text
//! Uninitialized ──hydrate()──▶ Hydrating ──record loaded──▶ Ready
//! ```
//!
//! The store never writes to its medium before reaching `Ready`, so an empty
//! in-memory default can never overwrite a record that has not been loaded yet.
//! Mutations issued earlier are applied in memory and logged; hydration replays
//! them on top of the loaded record.
//!
//! # Failure Policy
//!
//! Storage problems never reach the caller. An unreadable or malformed record
//! starts the store empty; a failed write is logged and the in-memory state
//! stays authoritative until the next successful write.

use crate::domain::{Movie, MovieId};
use crate::favorites::collection::FavoritesCollection;
use crate::storage::{record, Storage, STORAGE_KEY};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::collections::HashSet;

/// Hydration phase of a [`FavoritesStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Created, persisted record not read yet.
    Uninitialized,
    /// Reading and decoding the persisted record.
    Hydrating,
    /// Hydrated; every change is written through to the medium.
    Ready,
}

/// Notification delivered to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// Hydration finished with `count` favorites.
    Hydrated { count: usize },
    /// A mutation changed the collection, which now holds `count` favorites.
    Changed { count: usize },
}

/// Handle returned by [`FavoritesStore::subscribe`].
pub type SubscriptionId = u64;

type Listener = Box<dyn Fn(&StoreEvent) + Send>;

/// A mutation as issued by the caller, kept for replay when it arrives before hydration.
#[derive(Debug, Clone)]
enum Mutation {
    Add(Vec<Movie>),
    Remove(Vec<MovieId>),
}

impl Mutation {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Add(_) => "add",
            Self::Remove(_) => "remove",
        }
    }

    /// Ids touched by the mutation, for logging.
    fn ids(&self) -> Vec<MovieId> {
        match self {
            Self::Add(movies) => movies.iter().map(|movie| movie.id).collect(),
            Self::Remove(ids) => ids.clone(),
        }
    }

    /// Applies the mutation and reports whether the collection changed.
    fn apply(&self, collection: &mut FavoritesCollection) -> bool {
        match self {
            Self::Add(movies) => movies
                .iter()
                .fold(false, |changed, movie| collection.insert(movie.clone()) || changed),
            Self::Remove(ids) => {
                let ids: HashSet<MovieId> = ids.iter().copied().collect();
                ids.into_iter()
                    .fold(false, |changed, id| collection.remove(id).is_some() || changed)
            }
        }
    }
}

/// Owner of the favorites collection and its synchronization with a medium.
///
/// The type parameter is the persistence medium. Stores built without a medium
/// ([`FavoritesStore::in_memory`]) run in a non-persisted mode.
///
/// # Examples
///
/// ```
/// use flicklist::favorites::FavoritesStore;
/// use flicklist::storage::MemoryStorage;
/// use flicklist::Movie;
///
/// let mut store = FavoritesStore::new(MemoryStorage::new());
/// store.hydrate();
///
/// store.add(Movie::new(1, "Alien"));
/// assert!(store.contains(1));
/// assert_eq!(store.list().len(), 1);
/// assert_eq!(store.storage().unwrap().write_count(), 1);
/// ```
pub struct FavoritesStore<S = Box<dyn Storage>> {
    storage: Option<S>,
    collection: FavoritesCollection,
    phase: Phase,
    pending: Vec<Mutation>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: SubscriptionId,
}

impl FavoritesStore {
    /// Creates a store with no persistence medium.
    ///
    /// Hydration completes immediately with an empty collection and no write is
    /// ever attempted.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_medium(None)
    }

    /// Creates a store over a type-erased medium.
    #[must_use]
    pub fn boxed(storage: impl Storage + 'static) -> Self {
        let storage: Box<dyn Storage> = Box::new(storage);
        Self::with_medium(Some(storage))
    }
}

impl<S: Storage> FavoritesStore<S> {
    /// Creates an unhydrated store over `storage`.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_medium(Some(storage))
    }

    fn with_medium(storage: Option<S>) -> Self {
        Self {
            storage,
            collection: FavoritesCollection::new(),
            phase: Phase::Uninitialized,
            pending: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Current hydration phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` until hydration has completed.
    ///
    /// A loading store is in an unknown state, not a confirmed-empty one.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase != Phase::Ready
    }

    /// The persistence medium, if the store has one.
    #[must_use]
    pub fn storage(&self) -> Option<&S> {
        self.storage.as_ref()
    }

    /// Loads the persisted record and moves the store to [`Phase::Ready`].
    ///
    /// Runs once; later calls are no-ops. Mutations issued before hydration are
    /// replayed on top of the loaded record, and if that changes it the result
    /// is written back once. Returns the number of favorites after hydration.
    pub fn hydrate(&mut self) -> usize {
        if self.phase != Phase::Uninitialized {
            tracing::debug!(phase = ?self.phase, "hydrate called again, ignoring");
            return self.collection.len();
        }

        let _span = tracing::debug_span!("favorites_hydrate",
            pending = self.pending.len()
        ).entered();

        self.phase = Phase::Hydrating;
        let mut collection = FavoritesCollection::from_movies(self.load_record());

        let pending = std::mem::take(&mut self.pending);
        let replay_changed = pending
            .iter()
            .fold(false, |changed, mutation| mutation.apply(&mut collection) || changed);

        self.collection = collection;
        self.phase = Phase::Ready;

        if replay_changed {
            tracing::debug!(replayed = pending.len(), "pending mutations changed loaded record");
            self.persist();
        }

        let count = self.collection.len();
        tracing::debug!(count = count, "favorites hydrated");
        self.notify(StoreEvent::Hydrated { count });
        count
    }

    /// Adds `movie` unless a favorite with the same id exists.
    ///
    /// Returns `true` if the collection changed.
    pub fn add(&mut self, movie: Movie) -> bool {
        self.commit(Mutation::Add(vec![movie]))
    }

    /// Adds every movie whose id is not yet a favorite, in input order.
    ///
    /// Ids repeated inside the batch keep only their first occurrence. Calling
    /// twice with the same batch changes nothing the second time.
    pub fn add_many(&mut self, movies: Vec<Movie>) -> bool {
        if movies.is_empty() {
            return false;
        }
        self.commit(Mutation::Add(movies))
    }

    /// Removes the favorite with `id`; a missing id is a no-op.
    pub fn remove(&mut self, id: MovieId) -> bool {
        self.commit(Mutation::Remove(vec![id]))
    }

    /// Removes every favorite whose id is in `ids`.
    pub fn remove_many(&mut self, ids: &[MovieId]) -> bool {
        if ids.is_empty() {
            return false;
        }
        self.commit(Mutation::Remove(ids.to_vec()))
    }

    /// Returns `true` if `id` is a favorite.
    #[must_use]
    pub fn contains(&self, id: MovieId) -> bool {
        self.collection.contains(id)
    }

    /// Returns the favorite with `id`, if any.
    #[must_use]
    pub fn get(&self, id: MovieId) -> Option<&Movie> {
        self.collection.get(id)
    }

    /// Snapshot of the favorites in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Movie> {
        self.collection.to_vec()
    }

    /// Read-only view of the underlying collection.
    #[must_use]
    pub const fn collection(&self) -> &FavoritesCollection {
        &self.collection
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.len()
    }

    /// Returns `true` if there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.is_empty()
    }

    /// Favorites whose titles fuzzy-match every whitespace token of `query`.
    ///
    /// Matching is case-insensitive and keeps insertion order. A blank query
    /// returns every favorite.
    #[must_use]
    pub fn filter(&self, query: &str) -> Vec<Movie> {
        use fuzzy_matcher::FuzzyMatcher;

        let tokens: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if tokens.is_empty() {
            return self.list();
        }

        let matcher = SkimMatcherV2::default();
        self.collection
            .iter()
            .filter(|movie| {
                let title = movie.title.to_lowercase();
                tokens.iter().all(|token| matcher.fuzzy_match(&title, token).is_some())
            })
            .cloned()
            .collect()
    }

    /// Registers a listener called after hydration and after every change.
    ///
    /// Listeners run synchronously inside the mutating call. Through a
    /// [`SharedFavorites`](crate::favorites::SharedFavorites) handle that call
    /// holds the store lock, so a listener must not call back into the same
    /// handle; forward the event over a channel instead.
    pub fn subscribe(&mut self, listener: impl Fn(&StoreEvent) + Send + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(registered, _)| *registered != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, mutation: Mutation) -> bool {
        let _span = tracing::debug_span!("favorites_commit",
            kind = mutation.kind(),
            ids = ?mutation.ids(),
            phase = ?self.phase
        ).entered();

        let changed = mutation.apply(&mut self.collection);

        if self.phase != Phase::Ready {
            tracing::debug!(changed = changed, "store not hydrated, deferring write");
            self.pending.push(mutation);
        } else if changed {
            self.persist();
        }

        if changed {
            self.notify(StoreEvent::Changed { count: self.collection.len() });
        }
        changed
    }

    fn load_record(&self) -> Vec<Movie> {
        let Some(storage) = self.storage.as_ref() else {
            tracing::debug!("no persistence medium, starting empty");
            return Vec::new();
        };

        let raw = match storage.read(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no persisted favorites");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites, starting empty");
                return Vec::new();
            }
        };

        record::decode(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "discarding malformed favorites record");
            Vec::new()
        })
    }

    fn persist(&mut self) {
        debug_assert_eq!(self.phase, Phase::Ready);

        let Some(storage) = self.storage.as_mut() else {
            return;
        };

        let result = record::encode(&self.collection.to_vec())
            .and_then(|raw| storage.write(STORAGE_KEY, &raw));

        match result {
            Ok(()) => tracing::debug!(count = self.collection.len(), "favorites persisted"),
            Err(e) => tracing::warn!(error = %e, "failed to persist favorites, keeping in-memory state"),
        }
    }

    fn notify(&self, event: StoreEvent) {
        for (_, listener) in &self.listeners {
            listener(&event);
        }
    }
}

impl<S> std::fmt::Debug for FavoritesStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("phase", &self.phase)
            .field("len", &self.collection.len())
            .field("pending", &self.pending.len())
            .field("listeners", &self.listeners.len())
            .field("persisted", &self.storage.is_some())
            .finish()
    }
}
