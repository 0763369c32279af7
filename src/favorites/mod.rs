//! Favorites store: deduplicated, persisted collection of favorited movies.
//!
//! # Modules
//!
//! - `collection`: insertion-ordered map keyed by movie id
//! - `store`: hydration state machine, write-through persistence, notifications
//! - `shared`: lock-serialized handle for multi-threaded hosts

pub mod collection;
pub mod shared;
pub mod store;

pub use collection::FavoritesCollection;
pub use shared::SharedFavorites;
pub use store::{FavoritesStore, Phase, StoreEvent, SubscriptionId};
