//! Persistence media for the favorites record.
//!
//! The favorites store treats durable storage as a single key-value slot that
//! it reads once at hydration and overwrites after each change.
//!
//! # Modules
//!
//! - `backend`: [`Storage`] trait abstraction
//! - `file`: JSON file directory with atomic writes
//! - `memory`: process-local map, also used by tests
//! - `record`: record key and encode/decode of the movie list

pub mod backend;
pub mod file;
pub mod memory;
pub mod record;

pub use backend::Storage;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use record::STORAGE_KEY;
