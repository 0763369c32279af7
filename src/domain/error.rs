//! Error types for the flicklist crate.
//!
//! This module defines the centralized error type [`FlicklistError`] and a type alias
//! [`Result`] used by the favorites store, the persistence layer, the worker and the
//! configuration loader. Errors that cross the HTTP boundary live in
//! [`crate::gateway::GatewayError`] instead, because they carry a status code.

use thiserror::Error;

/// The main error type for flicklist operations.
///
/// Most variants carry a description of what went wrong. I/O and JSON errors
/// convert automatically through `#[from]`.
///
/// # Examples
///
/// ```
/// use flicklist::FlicklistError;
///
/// fn read_record() -> Result<(), FlicklistError> {
///     Err(FlicklistError::Storage("medium unavailable".to_string()))
/// }
///
/// assert!(read_record().is_err());
/// ```
#[derive(Debug, Error)]
pub enum FlicklistError {
    /// Reading from or writing to the persistence medium failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted record or wire payload could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Communication with the favorites worker thread failed.
    ///
    /// Occurs when the worker has shut down or dropped its reply channel.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// The lock guarding a shared store was poisoned by a panicking holder.
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

/// A specialized `Result` type for flicklist operations.
pub type Result<T> = std::result::Result<T, FlicklistError>;
