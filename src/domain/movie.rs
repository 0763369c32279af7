//! Movie domain model.
//!
//! A [`Movie`] is the single searchable and favoritable entity. It is an
//! immutable value as received from the search gateway, and it is persisted
//! verbatim inside the favorites record. Serde field names match the upstream
//! metadata API so the same type serves the wire format and the stored record.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Unique, session-stable movie identifier assigned by the upstream API.
pub type MovieId = i64;

/// A movie as returned by the search gateway.
///
/// Unknown fields are ignored on deserialization, so records written by a
/// future version with extra optional fields stay readable.
///
/// # Fields
///
/// - `id`: primary key for every set operation in the favorites store
/// - `title`: display name
/// - `poster_path`: poster image reference, `None` when the upstream has none
/// - `vote_average`: score, nominally 0.0 to 10.0 (not enforced)
/// - `release_date`: `YYYY-MM-DD` or empty
/// - `overview`: free text, may be empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub overview: String,
}

impl Movie {
    /// Creates a movie with only an id and a title; the remaining fields are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use flicklist::Movie;
    ///
    /// let movie = Movie::new(603, "The Matrix");
    /// assert_eq!(movie.id, 603);
    /// assert!(movie.poster_path.is_none());
    /// ```
    #[must_use]
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            poster_path: None,
            vote_average: 0.0,
            release_date: String::new(),
            overview: String::new(),
        }
    }

    /// Returns the release year.
    ///
    /// Parses a full `YYYY-MM-DD` date first. Partial dates such as `"1999"` or
    /// `"1999-03"` fall back to their leading year segment. Empty or unparseable
    /// values yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use flicklist::Movie;
    ///
    /// let mut movie = Movie::new(603, "The Matrix");
    /// movie.release_date = "1999-03-30".to_string();
    /// assert_eq!(movie.release_year(), Some(1999));
    ///
    /// movie.release_date.clear();
    /// assert_eq!(movie.release_year(), None);
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let raw = self.release_date.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date.year());
        }

        raw.split('-')
            .next()
            .filter(|year| year.len() == 4)
            .and_then(|year| year.parse().ok())
    }

    /// Returns `true` when the movie carries a non-blank poster reference.
    #[must_use]
    pub fn has_poster(&self) -> bool {
        self.poster_path
            .as_deref()
            .is_some_and(|path| !path.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_year_handles_partial_dates() {
        let mut movie = Movie::new(1, "Partial");
        movie.release_date = "2004-11".to_string();
        assert_eq!(movie.release_year(), Some(2004));

        movie.release_date = "soon".to_string();
        assert_eq!(movie.release_year(), None);
    }

    #[test]
    fn deserializes_null_poster_and_missing_optionals() {
        let movie: Movie = serde_json::from_str(r#"{"id":7,"title":"Se7en","poster_path":null}"#)
            .expect("valid movie json");
        assert_eq!(movie.id, 7);
        assert!(movie.poster_path.is_none());
        assert!(movie.release_date.is_empty());
        assert!(movie.overview.is_empty());
        assert!((movie.vote_average - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn ignores_unknown_fields() {
        let movie: Movie = serde_json::from_str(
            r#"{"id":1,"title":"A","poster_path":"/a.jpg","vote_average":7.5,
                "release_date":"2001-01-01","overview":"x","original_language":"en"}"#,
        )
        .expect("forward-compatible json");
        assert!(movie.has_poster());
        assert_eq!(movie.release_year(), Some(2001));
    }

    #[test]
    fn serializes_all_six_fields() {
        let json = serde_json::to_value(Movie::new(2, "B")).expect("serializable");
        let object = json.as_object().expect("object");
        for key in ["id", "title", "poster_path", "vote_average", "release_date", "overview"] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert_eq!(object.len(), 6);
    }
}
