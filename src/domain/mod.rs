//! Domain layer for flicklist.
//!
//! Core types shared by every other layer, independent of HTTP, storage media or
//! threading concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie model and identifier type
//!
//! # Examples
//!
//! ```
//! use flicklist::domain::{Movie, Result};
//!
//! fn pick() -> Result<Movie> {
//!     Ok(Movie::new(27205, "Inception"))
//! }
//! # assert_eq!(pick().unwrap().id, 27205);
//! ```

pub mod error;
pub mod movie;

pub use error::{FlicklistError, Result};
pub use movie::{Movie, MovieId};
