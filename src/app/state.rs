//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for everything the presentation
//! layer shows: the query being typed, the status of the latest search, its
//! results, and the favorites store. View models are computed on demand from
//! state snapshots.
//!
//! # Example
//!
//! ```rust
//! use flicklist::app::AppState;
//! use flicklist::favorites::FavoritesStore;
//!
//! let mut state = AppState::new(FavoritesStore::in_memory());
//! state.favorites.hydrate();
//! let viewmodel = state.compute_viewmodel();
//! assert!(viewmodel.search.cards.is_empty());
//! ```

use super::modes::{SearchStatus, ViewMode};
use crate::domain::Movie;
use crate::favorites::FavoritesStore;
use crate::gateway::SearchQuery;
use crate::storage::Storage;
use crate::ui::viewmodel::{
    ErrorBanner, FavoritesSection, HeaderInfo, MovieCard, SearchSection, UIViewModel, SKELETON_COUNT,
};

/// Central application state container.
#[derive(Debug)]
pub struct AppState<S = Box<dyn Storage>> {
    /// Text currently in the search box, untrimmed.
    pub query: String,

    /// Status of the latest submission.
    pub status: SearchStatus,

    /// Results of the latest completed search, at most the gateway cap.
    pub results: Vec<Movie>,

    /// Upstream total for the latest search, independent of `results.len()`.
    pub total_results: u64,

    /// Focused section.
    pub view_mode: ViewMode,

    /// Persisted favorites.
    pub favorites: FavoritesStore<S>,

    /// Sequence number of the latest submission; 0 before the first.
    pub(crate) latest_seq: u64,

    /// Query of the latest accepted submission, reused by retry.
    pub(crate) last_submitted: Option<SearchQuery>,
}

impl<S: Storage> AppState<S> {
    /// Creates idle state around a (typically unhydrated) favorites store.
    #[must_use]
    pub fn new(favorites: FavoritesStore<S>) -> Self {
        Self {
            query: String::new(),
            status: SearchStatus::Idle,
            results: Vec::new(),
            total_results: 0,
            view_mode: ViewMode::Results,
            favorites,
            latest_seq: 0,
            last_submitted: None,
        }
    }

    /// Sequence number of the latest submission.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Starts a new submission and returns its sequence number.
    pub(crate) fn begin_search(&mut self, query: SearchQuery) -> u64 {
        self.latest_seq += 1;
        self.status = SearchStatus::Loading;
        self.results.clear();
        self.total_results = 0;
        self.view_mode = ViewMode::Results;
        self.last_submitted = Some(query);
        self.latest_seq
    }

    /// Computes a renderable view model from current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let _span = tracing::debug_span!("compute_viewmodel",
            results = self.results.len(),
            favorites = self.favorites.len(),
            status = ?self.status
        ).entered();

        UIViewModel {
            header: HeaderInfo::default(),
            search: self.compute_search_section(),
            favorites: FavoritesSection::build(self.favorites.is_loading(), &self.favorites.list()),
            favorites_focused: self.view_mode == ViewMode::Favorites,
        }
    }

    fn compute_search_section(&self) -> SearchSection {
        let loading = self.status.is_loading();

        let error = match &self.status {
            SearchStatus::Failed { message, retryable } => Some(ErrorBanner {
                message: message.clone(),
                retryable: *retryable,
            }),
            _ => None,
        };

        let summary = (!self.results.is_empty())
            .then(|| format!("Found {} movies", self.results.len()));

        let cards = self
            .results
            .iter()
            .map(|movie| MovieCard::build(movie, self.favorites.contains(movie.id)))
            .collect();

        SearchSection {
            query: self.query.clone(),
            button_label: if loading { "Searching..." } else { "Search" }.to_string(),
            button_disabled: loading,
            error,
            summary,
            placeholders: if loading { SKELETON_COUNT } else { 0 },
            cards,
        }
    }
}
