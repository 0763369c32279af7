//! Search status and view mode state types.
//!
//! # State Machine
//!
//! ```text
//! Idle ──submit──▶ Loading ──response──▶ Loaded
//!   │                 │ └────failure───▶ Failed ──retry──▶ Loading
//!   └─blank submit──▶ Failed (not retryable)
//! ```

/// Progress of the most recent search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// Nothing submitted yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request returned results (possibly none).
    Loaded,
    /// The latest submission failed.
    Failed {
        /// Message shown inline.
        message: String,
        /// Whether a retry affordance should be offered.
        ///
        /// Validation failures are not retryable; gateway and transport
        /// failures are.
        retryable: bool,
    },
}

impl SearchStatus {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Which section has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Search form and results.
    Results,
    /// The favorites list.
    Favorites,
}
