//! Serialized favorites record.
//!
//! The whole favorites collection is stored as one JSON array under a single
//! fixed key, replaced wholesale on every change. Each element carries exactly
//! the six movie fields with their names preserved, so a later version that adds
//! optional fields can still read old records and vice versa.
//!
//! ```json
//! [
//!   {
//!     "id": 603,
//!     "title": "The Matrix",
//!     "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
//!     "vote_average": 8.2,
//!     "release_date": "1999-03-30",
//!     "overview": "Set in the 22nd century..."
//!   }
//! ]
//! ```

use crate::domain::error::Result;
use crate::domain::Movie;

/// Key under which the favorites record is stored.
pub const STORAGE_KEY: &str = "movieFavorites";

/// Serializes movies, in order, into the record format.
///
/// # Errors
///
/// Returns an error if serialization fails, which only happens for
/// non-finite ratings.
pub fn encode(movies: &[Movie]) -> Result<String> {
    Ok(serde_json::to_string(movies)?)
}

/// Parses a stored record back into movies, preserving order.
///
/// A blank record reads as an empty list.
///
/// # Errors
///
/// Returns an error if the record is not a JSON array of movies.
///
/// # Examples
///
/// ```
/// use flicklist::storage::record;
///
/// assert!(record::decode("  ")?.is_empty());
/// assert!(record::decode("{broken").is_err());
/// # Ok::<(), flicklist::FlicklistError>(())
/// ```
pub fn decode(raw: &str) -> Result<Vec<Movie>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: i64, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            poster_path: Some(format!("/{id}.jpg")),
            vote_average: 7.25,
            release_date: "2010-07-16".to_string(),
            overview: "Dreams within dreams".to_string(),
        }
    }

    #[test]
    fn round_trip_preserves_order_and_fields() {
        let movies = vec![sample(3, "C"), sample(1, "A"), Movie::new(2, "B")];
        let raw = encode(&movies).expect("encode");
        assert_eq!(decode(&raw).expect("decode"), movies);
    }

    #[test]
    fn rejects_non_array_records() {
        assert!(decode(r#"{"id":1,"title":"A"}"#).is_err());
        assert!(decode(r#"[{"title":"missing id"}]"#).is_err());
    }

    #[test]
    fn reads_records_with_extra_fields() {
        let raw = r#"[{"id":1,"title":"A","poster_path":null,"vote_average":5.0,
                      "release_date":"","overview":"","watched":true}]"#;
        let movies = decode(raw).expect("forward-compatible record");
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "A");
    }
}
