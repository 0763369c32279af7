//! Search gateway: a thin proxy in front of the upstream movie-metadata API.
//!
//! ```text
//! ProxyClient ──GET /api/search?q=──▶ server ──▶ ResponseCache ──miss──▶ UpstreamClient
//! ```
//!
//! # Modules
//!
//! - `query`: trimmed, non-empty query type
//! - `models`: response and error bodies, result cap
//! - `error`: failure causes and their status codes
//! - `upstream`: reqwest client for the metadata API
//! - `cache`: revalidation window for repeated queries
//! - `server`: axum router and serve loop
//! - `client`: reqwest client for the proxy

pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod query;
pub mod server;
pub mod upstream;

pub use cache::ResponseCache;
pub use client::{ClientError, ProxyClient};
pub use error::GatewayError;
pub use models::{ErrorBody, SearchResponse, RESULT_CAP};
pub use query::SearchQuery;
pub use server::{router, serve, GatewayState};
pub use upstream::UpstreamClient;
