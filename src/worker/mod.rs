//! Background worker thread for favorites storage operations.
//!
//! The worker owns the favorites store so file I/O stays off the caller's
//! thread. Requests and responses travel over std channels and carry trace
//! context across the thread boundary.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker loop and the caller-side handle

pub mod handler;
pub mod messages;

pub use handler::{FavoritesWorker, WorkerHandle};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
