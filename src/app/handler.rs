//! Event handling and state transition logic.
//!
//! # Event Types
//!
//! - **Input**: `QueryChanged`, `SubmitSearch`, `Retry`
//! - **Gateway**: `SearchCompleted`
//! - **Favorites**: `HydrateFavorites`, `ToggleFavorite`, `AddAllResults`,
//!   `RemoveFavorite`, `ClearFavorites`
//! - **Navigation**: `ShowResults`, `ShowFavorites`
//!
//! # Example
//!
//! ```rust
//! use flicklist::app::{handle_event, Action, AppState, Event};
//! use flicklist::favorites::FavoritesStore;
//!
//! let mut state = AppState::new(FavoritesStore::in_memory());
//! handle_event(&mut state, &Event::QueryChanged("  alien ".to_string()));
//! let (_, actions) = handle_event(&mut state, &Event::SubmitSearch);
//! assert_eq!(actions, vec![Action::PerformSearch { seq: 1, query: "alien".to_string() }]);
//! ```

use crate::app::modes::{SearchStatus, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::{Movie, MovieId};
use crate::gateway::client::EMPTY_QUERY_MESSAGE;
use crate::gateway::{SearchQuery, SearchResponse};
use crate::storage::Storage;

/// Outcome of a search as delivered back to the handler.
///
/// The error side is the user-visible message.
pub type SearchOutcome = std::result::Result<SearchResponse, String>;

/// Events triggered by user input or completed side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The search box text changed.
    QueryChanged(String),
    /// The search form was submitted.
    SubmitSearch,
    /// Re-submit the last query after a failure.
    Retry,
    /// A search issued by [`Action::PerformSearch`] finished.
    SearchCompleted {
        /// Sequence number from the originating action.
        seq: u64,
        outcome: SearchOutcome,
    },
    /// Load persisted favorites; sent once at startup.
    HydrateFavorites,
    /// Add the movie to favorites, or remove it if already there.
    ToggleFavorite(Movie),
    /// Add every current result to favorites.
    AddAllResults,
    /// Remove one favorite.
    RemoveFavorite(MovieId),
    /// Remove every favorite.
    ClearFavorites,
    /// Focus search results.
    ShowResults,
    /// Focus favorites.
    ShowFavorites,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean is `true` when the state changed and the view should be
/// recomputed.
pub fn handle_event<S: Storage>(state: &mut AppState<S>, event: &Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::QueryChanged(text) => {
            state.query.clone_from(text);
            (true, vec![])
        }
        Event::SubmitSearch => {
            let raw = state.query.clone();
            submit(state, &raw)
        }
        Event::Retry => {
            let retryable = matches!(state.status, SearchStatus::Failed { retryable: true, .. });
            match state.last_submitted.clone() {
                Some(query) if retryable => {
                    tracing::debug!(query = %query, "retrying search");
                    let seq = state.begin_search(query.clone());
                    (true, vec![Action::PerformSearch { seq, query: query.to_string() }])
                }
                _ => {
                    tracing::debug!("nothing to retry");
                    (false, vec![])
                }
            }
        }
        Event::SearchCompleted { seq, outcome } => {
            if *seq != state.latest_seq {
                tracing::debug!(
                    seq = seq,
                    latest = state.latest_seq,
                    "dropping stale search response"
                );
                return (false, vec![]);
            }
            match outcome {
                Ok(response) => {
                    tracing::debug!(
                        count = response.results.len(),
                        total = response.total_results,
                        "search results received"
                    );
                    state.results.clone_from(&response.results);
                    state.total_results = response.total_results;
                    state.status = SearchStatus::Loaded;
                }
                Err(message) => {
                    tracing::debug!(message = %message, "search failed");
                    state.status = SearchStatus::Failed {
                        message: message.clone(),
                        retryable: true,
                    };
                }
            }
            (true, vec![])
        }
        Event::HydrateFavorites => {
            let was_loading = state.favorites.is_loading();
            state.favorites.hydrate();
            (was_loading, vec![])
        }
        Event::ToggleFavorite(movie) => {
            let changed = if state.favorites.contains(movie.id) {
                state.favorites.remove(movie.id)
            } else {
                state.favorites.add(movie.clone())
            };
            (changed, vec![])
        }
        Event::AddAllResults => {
            let changed = state.favorites.add_many(state.results.clone());
            (changed, vec![])
        }
        Event::RemoveFavorite(id) => (state.favorites.remove(*id), vec![]),
        Event::ClearFavorites => {
            let ids: Vec<MovieId> = state.favorites.collection().iter().map(|m| m.id).collect();
            (state.favorites.remove_many(&ids), vec![])
        }
        Event::ShowResults => switch_view(state, ViewMode::Results),
        Event::ShowFavorites => switch_view(state, ViewMode::Favorites),
    }
}

fn submit<S: Storage>(state: &mut AppState<S>, raw: &str) -> (bool, Vec<Action>) {
    match SearchQuery::parse(raw) {
        Ok(query) => {
            let seq = state.begin_search(query.clone());
            tracing::debug!(seq = seq, query = %query, "search submitted");
            (true, vec![Action::PerformSearch { seq, query: query.to_string() }])
        }
        Err(_) => {
            tracing::debug!("blank query rejected before any request");
            state.status = SearchStatus::Failed {
                message: EMPTY_QUERY_MESSAGE.to_string(),
                retryable: false,
            };
            (true, vec![])
        }
    }
}

fn switch_view<S: Storage>(state: &mut AppState<S>, mode: ViewMode) -> (bool, Vec<Action>) {
    let changed = state.view_mode != mode;
    state.view_mode = mode;
    (changed, vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::FavoritesStore;
    use crate::storage::MemoryStorage;

    fn state() -> AppState<MemoryStorage> {
        let mut state = AppState::new(FavoritesStore::new(MemoryStorage::new()));
        handle_event(&mut state, &Event::HydrateFavorites);
        state
    }

    fn response(ids: &[MovieId]) -> SearchResponse {
        SearchResponse {
            results: ids.iter().map(|&id| Movie::new(id, format!("movie {id}"))).collect(),
            total_results: 100,
            total_pages: 5,
        }
    }

    fn submit_query(state: &mut AppState<MemoryStorage>, text: &str) -> u64 {
        handle_event(state, &Event::QueryChanged(text.to_string()));
        let (_, actions) = handle_event(state, &Event::SubmitSearch);
        match actions.as_slice() {
            [Action::PerformSearch { seq, .. }] => *seq,
            other => panic!("expected one search action, got {other:?}"),
        }
    }

    #[test]
    fn whitespace_query_is_rejected_without_action() {
        let mut state = state();
        handle_event(&mut state, &Event::QueryChanged("  ".to_string()));
        let (render, actions) = handle_event(&mut state, &Event::SubmitSearch);

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(
            state.status,
            SearchStatus::Failed { message: EMPTY_QUERY_MESSAGE.to_string(), retryable: false }
        );
        assert_eq!(state.latest_seq(), 0);
    }

    #[test]
    fn stale_responses_are_dropped() {
        let mut state = state();
        let first = submit_query(&mut state, "alien");
        let second = submit_query(&mut state, "aliens");

        let (render, _) = handle_event(
            &mut state,
            &Event::SearchCompleted { seq: second, outcome: Ok(response(&[2])) },
        );
        assert!(render);

        let (render, _) = handle_event(
            &mut state,
            &Event::SearchCompleted { seq: first, outcome: Ok(response(&[1])) },
        );
        assert!(!render);
        assert_eq!(state.results.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);
        assert_eq!(state.total_results, 100);
    }

    #[test]
    fn failure_offers_retry_with_last_query() {
        let mut state = state();
        let seq = submit_query(&mut state, " heat ");
        handle_event(
            &mut state,
            &Event::SearchCompleted { seq, outcome: Err("Failed to fetch movies. Try again.".to_string()) },
        );

        let banner = state.compute_viewmodel().search.error.expect("error banner");
        assert!(banner.retryable);

        handle_event(&mut state, &Event::QueryChanged("edited".to_string()));
        let (_, actions) = handle_event(&mut state, &Event::Retry);
        assert_eq!(
            actions,
            vec![Action::PerformSearch { seq: seq + 1, query: "heat".to_string() }]
        );
        assert!(state.status.is_loading());
    }

    #[test]
    fn retry_without_failure_does_nothing() {
        let mut state = state();
        let (render, actions) = handle_event(&mut state, &Event::Retry);
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut state = state();
        let movie = Movie::new(42, "Hitchhiker");

        handle_event(&mut state, &Event::ToggleFavorite(movie.clone()));
        assert!(state.favorites.contains(42));

        handle_event(&mut state, &Event::ToggleFavorite(movie));
        assert!(!state.favorites.contains(42));
    }

    #[test]
    fn add_all_results_then_clear() {
        let mut state = state();
        let seq = submit_query(&mut state, "star");
        handle_event(&mut state, &Event::SearchCompleted { seq, outcome: Ok(response(&[1, 2, 3])) });

        handle_event(&mut state, &Event::AddAllResults);
        assert_eq!(state.favorites.len(), 3);

        let vm = state.compute_viewmodel();
        assert!(vm.search.cards.iter().all(|card| card.is_favorite));
        assert_eq!(vm.search.summary.as_deref(), Some("Found 3 movies"));

        handle_event(&mut state, &Event::ClearFavorites);
        assert!(state.favorites.is_empty());
    }

    #[test]
    fn loading_view_shows_placeholders() {
        let mut state = state();
        submit_query(&mut state, "matrix");
        let vm = state.compute_viewmodel();
        assert!(vm.search.button_disabled);
        assert_eq!(vm.search.button_label, "Searching...");
        assert!(vm.search.placeholders > 0);
    }

    #[test]
    fn switching_views() {
        let mut state = state();
        let (changed, _) = handle_event(&mut state, &Event::ShowFavorites);
        assert!(changed);
        assert!(state.compute_viewmodel().favorites_focused);
        let (changed, _) = handle_event(&mut state, &Event::ShowFavorites);
        assert!(!changed);
    }
}
