//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the host (a web page, a terminal, tests) and the
//! favorites store and search gateway. It implements a unidirectional data
//! flow:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Search Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`effects`]: Async execution of actions against the proxy
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Search status and view mode types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use flicklist::app::{handle_event, AppState, Event};
//! use flicklist::domain::Movie;
//! use flicklist::favorites::FavoritesStore;
//!
//! let mut state = AppState::new(FavoritesStore::in_memory());
//! handle_event(&mut state, &Event::HydrateFavorites);
//! handle_event(&mut state, &Event::ToggleFavorite(Movie::new(603, "The Matrix")));
//! assert!(state.favorites.contains(603));
//! ```

pub mod actions;
pub mod effects;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use effects::perform;
pub use handler::{handle_event, Event, SearchOutcome};
pub use modes::{SearchStatus, ViewMode};
pub use state::AppState;
