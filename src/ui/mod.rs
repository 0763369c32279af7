//! Presentation view models.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → host renderer
//! ```
//!
//! Rendering itself belongs to the host (web page, terminal, native view); this
//! layer stops at display-ready data.
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types and their fallbacks

pub mod viewmodel;

pub use viewmodel::{
    EmptyState, ErrorBanner, FavoritesSection, HeaderInfo, MovieCard, SearchSection, UIViewModel,
};
