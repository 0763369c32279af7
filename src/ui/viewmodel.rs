//! View model types representing renderable UI state.
//!
//! View models are computed from application state via
//! `AppState::compute_viewmodel()` and handed to whatever renders them. They
//! carry display-ready strings only: fallbacks for missing posters, dates and
//! descriptions are resolved here, never in the favorites store.

use crate::domain::Movie;

/// Base URL prepended to upstream poster paths.
pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Image shown when a movie has no poster.
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Number of skeleton cards shown while a search is in flight.
pub const SKELETON_COUNT: usize = 8;

const UNKNOWN_YEAR: &str = "Unknown";
const UNKNOWN_RATING: &str = "N/A";
const MISSING_OVERVIEW: &str = "No description available";

/// Complete UI view model.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search: SearchSection,
    pub favorites: FavoritesSection,
    /// `true` when the favorites section is the focused view.
    pub favorites_focused: bool,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub subtitle: String,
}

impl Default for HeaderInfo {
    fn default() -> Self {
        Self {
            title: "Movie Explorer".to_string(),
            subtitle: "Search millions of movies".to_string(),
        }
    }
}

/// Search form, status line and results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSection {
    pub query: String,
    pub button_label: String,
    pub button_disabled: bool,
    pub error: Option<ErrorBanner>,
    /// `"Found N movies"`, present only when there are results.
    pub summary: Option<String>,
    /// Skeleton placeholders to draw in place of results.
    pub placeholders: usize,
    pub cards: Vec<MovieCard>,
}

/// Inline error with an optional retry affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    pub message: String,
    pub retryable: bool,
}

/// Favorites section state.
///
/// `Loading` and `Empty` are distinct: the first means the persisted list has
/// not been read yet, the second that it was read and holds nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesSection {
    Loading { title: String },
    Empty(EmptyState),
    Grid { title: String, cards: Vec<MovieCard> },
}

impl FavoritesSection {
    /// Builds the section from the store's loading flag and current favorites.
    #[must_use]
    pub fn build(is_loading: bool, favorites: &[Movie]) -> Self {
        if is_loading {
            return Self::Loading {
                title: "Your Favorites".to_string(),
            };
        }

        let title = format!("Your Favorites ({})", favorites.len());
        if favorites.is_empty() {
            return Self::Empty(EmptyState {
                title,
                message: "No favorites yet".to_string(),
                subtitle: "Search for movies and click the heart icon to save them here".to_string(),
            });
        }

        Self::Grid {
            title,
            cards: favorites.iter().map(|m| MovieCard::build(m, true)).collect(),
        }
    }
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
    pub subtitle: String,
}

/// One movie, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    /// Rating with one decimal, e.g. `"7.3"`.
    pub rating: String,
    pub year: String,
    pub overview: String,
    pub is_favorite: bool,
    pub favorite_label: String,
}

impl MovieCard {
    #[must_use]
    pub fn build(movie: &Movie, is_favorite: bool) -> Self {
        let poster_url = match movie.poster_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => format!("{POSTER_BASE_URL}{path}"),
            _ => PLACEHOLDER_POSTER_URL.to_string(),
        };

        let rating = if movie.vote_average.is_finite() {
            format!("{:.1}", movie.vote_average)
        } else {
            UNKNOWN_RATING.to_string()
        };

        let year = movie
            .release_year()
            .map_or_else(|| UNKNOWN_YEAR.to_string(), |y| y.to_string());

        let overview = if movie.overview.trim().is_empty() {
            MISSING_OVERVIEW.to_string()
        } else {
            movie.overview.clone()
        };

        let favorite_label = if is_favorite {
            "Remove from Favorites"
        } else {
            "Add to Favorites"
        };

        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url,
            rating,
            year,
            overview,
            is_favorite,
            favorite_label: favorite_label.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_falls_back_for_missing_fields() {
        let card = MovieCard::build(&Movie::new(1, "Untitled"), false);
        assert_eq!(card.poster_url, PLACEHOLDER_POSTER_URL);
        assert_eq!(card.year, "Unknown");
        assert_eq!(card.rating, "0.0");
        assert_eq!(card.overview, "No description available");
        assert_eq!(card.favorite_label, "Add to Favorites");
    }

    #[test]
    fn card_formats_present_fields() {
        let movie = Movie {
            id: 78,
            title: "Blade Runner".to_string(),
            poster_path: Some("/63N9.jpg".to_string()),
            vote_average: 7.94,
            release_date: "1982-06-25".to_string(),
            overview: "Replicants.".to_string(),
        };
        let card = MovieCard::build(&movie, true);
        assert_eq!(card.poster_url, "https://image.tmdb.org/t/p/w500/63N9.jpg");
        assert_eq!(card.rating, "7.9");
        assert_eq!(card.year, "1982");
        assert_eq!(card.favorite_label, "Remove from Favorites");
    }

    #[test]
    fn favorites_section_distinguishes_loading_from_empty() {
        assert!(matches!(FavoritesSection::build(true, &[]), FavoritesSection::Loading { .. }));

        match FavoritesSection::build(false, &[]) {
            FavoritesSection::Empty(state) => assert_eq!(state.title, "Your Favorites (0)"),
            other => panic!("expected empty state, got {other:?}"),
        }

        match FavoritesSection::build(false, &[Movie::new(1, "a")]) {
            FavoritesSection::Grid { title, cards } => {
                assert_eq!(title, "Your Favorites (1)");
                assert!(cards[0].is_favorite);
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }
}
