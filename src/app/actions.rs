//! Actions representing side effects to be executed by the host runtime.
//!
//! The event handler stays synchronous and free of I/O; anything that needs the
//! network comes back out as an [`Action`]. The host executes it (see
//! [`crate::app::effects::perform`]) and feeds the resulting event back in.
//!
//! # Example
//!
//! ```rust
//! use flicklist::app::Action;
//!
//! let action = Action::PerformSearch { seq: 1, query: "heat".to_string() };
//! assert!(matches!(action, Action::PerformSearch { seq: 1, .. }));
//! ```

/// Commands representing side effects to be executed by the host runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends a search through the gateway.
    ///
    /// The response must come back as `Event::SearchCompleted` carrying the
    /// same `seq`, so responses that arrive after a newer submission can be
    /// recognized and dropped.
    PerformSearch {
        /// Sequence number of the submission.
        seq: u64,
        /// Trimmed query text.
        query: String,
    },
}
