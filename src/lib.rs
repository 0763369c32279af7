//! Flicklist: movie search with a persisted favorites list.
//!
//! Flicklist provides:
//! - A search gateway that proxies an upstream movie-metadata API, keeping the
//!   API credentials server-side and capping every response at 20 movies
//! - A favorites store that deduplicates by movie id, keeps insertion order,
//!   and persists to a local JSON record once it has been hydrated
//! - A presentation-agnostic application layer (events in, actions out) with
//!   display-ready view models

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Binary (main.rs)                                   │  ← Serves the gateway
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, stale-response dropping          │
//! │  - Action execution through the proxy client        │
//! │  - View model computation (ui/)                     │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Gateway       │   │ Favorites     │   │ Worker        │
//! │ (gateway/)    │   │ (favorites/)  │   │ (worker/)     │
//! │ - axum proxy  │   │ - Dedup/order │   │ - Store on a  │
//! │ - Cache       │   │ - Hydration   │   │   thread      │
//! │ - Client      │   │ - Subscribers │   │ - Trace ctx   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────┐
//! │  Storage, Domain & Infrastructure                   │
//! │  - Key/value persistence media (storage/)           │
//! │  - Movie model, errors (domain/)                    │
//! │  - Data directory resolution (infrastructure/)      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - stderr logging, optional OTLP trace file         │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! [`Config::load`] reads an optional TOML file and then applies environment
//! overrides:
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 3000
//! tmdb_base_url = "https://api.themoviedb.org/3"
//! tmdb_api_key = "..."
//! data_dir = "~/.local/share/flicklist"
//! log_level = "debug"
//! trace_file = "/tmp/flicklist-otlp.json"
//! cache_ttl_secs = 60
//! ```
//!
//! | Variable               | Field            |
//! |------------------------|------------------|
//! | `FLICKLIST_HOST`       | `host`           |
//! | `FLICKLIST_PORT`       | `port`           |
//! | `TMDB_BASE_URL`        | `tmdb_base_url`  |
//! | `TMDB_API_KEY`         | `tmdb_api_key`   |
//! | `FLICKLIST_DATA_DIR`   | `data_dir`       |
//! | `FLICKLIST_LOG`        | `log_level`      |
//! | `FLICKLIST_TRACE_FILE` | `trace_file`     |
//! | `FLICKLIST_CACHE_SECS` | `cache_ttl_secs` |
//!
//! # Example
//!
//! ```rust
//! use flicklist::{handle_event, AppState, Event, Movie};
//! use flicklist::favorites::FavoritesStore;
//!
//! let mut state = AppState::new(FavoritesStore::in_memory());
//! handle_event(&mut state, &Event::HydrateFavorites);
//! handle_event(&mut state, &Event::ToggleFavorite(Movie::new(78, "Blade Runner")));
//!
//! let viewmodel = state.compute_viewmodel();
//! assert!(matches!(
//!     viewmodel.favorites,
//!     flicklist::ui::FavoritesSection::Grid { .. }
//! ));
//! ```

pub mod app;
pub mod domain;
pub mod favorites;
pub mod gateway;
pub mod infrastructure;
pub mod storage;
pub mod ui;
pub mod worker;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, SearchStatus, ViewMode};
pub use domain::{FlicklistError, Movie, MovieId, Result};

use crate::favorites::FavoritesStore;
use crate::storage::FileStorage;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interface the gateway binds to. Default: `127.0.0.1`
    pub host: String,

    /// Port the gateway listens on. Default: `3000`
    pub port: u16,

    /// Base URL of the upstream metadata API, without trailing slash.
    ///
    /// Unset means every search answers 500 "API configuration missing".
    pub tmdb_base_url: Option<String>,

    /// Upstream API key. Never sent to clients.
    pub tmdb_api_key: Option<String>,

    /// Directory holding the favorites record. Default: [`infrastructure::get_data_dir`]
    pub data_dir: Option<PathBuf>,

    /// Log filter directive when `RUST_LOG` is unset. Default: `"info"`
    pub log_level: Option<String>,

    /// Optional OTLP JSON trace file.
    pub trace_file: Option<PathBuf>,

    /// Seconds a gateway response is reused for the same query. `0` disables
    /// caching. Default: `60`
    pub cache_ttl_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            tmdb_base_url: None,
            tmdb_api_key: None,
            data_dir: None,
            log_level: None,
            trace_file: None,
            cache_ttl_secs: 60,
        }
    }
}

impl Config {
    /// Loads the TOML file at `path` (if any) and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Config`] if the file cannot be read or parsed,
    /// or if a numeric environment override is malformed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    FlicklistError::Config(format!("failed to read {}: {e}", path.display()))
                })?;
                Self::from_toml_str(&contents)?
            }
            None => Self::default(),
        };

        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parses a TOML document; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Config`] on invalid TOML or unknown keys.
    ///
    /// # Example
    ///
    /// ```rust
    /// use flicklist::Config;
    ///
    /// let config = Config::from_toml_str("port = 8080").unwrap();
    /// assert_eq!(config.port, 8080);
    /// assert_eq!(config.cache_ttl_secs, 60);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| FlicklistError::Config(format!("invalid config: {e}")))
    }

    /// Overrides fields from environment variables found through `lookup`.
    ///
    /// Blank values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FlicklistError::Config`] if `FLICKLIST_PORT` or
    /// `FLICKLIST_CACHE_SECS` is not a number.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(host) = var("FLICKLIST_HOST") {
            self.host = host;
        }
        if let Some(port) = var("FLICKLIST_PORT") {
            self.port = parse_number("FLICKLIST_PORT", &port)?;
        }
        if let Some(url) = var("TMDB_BASE_URL") {
            self.tmdb_base_url = Some(url);
        }
        if let Some(key) = var("TMDB_API_KEY") {
            self.tmdb_api_key = Some(key);
        }
        if let Some(dir) = var("FLICKLIST_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = var("FLICKLIST_LOG") {
            self.log_level = Some(level);
        }
        if let Some(file) = var("FLICKLIST_TRACE_FILE") {
            self.trace_file = Some(PathBuf::from(file));
        }
        if let Some(secs) = var("FLICKLIST_CACHE_SECS") {
            self.cache_ttl_secs = parse_number("FLICKLIST_CACHE_SECS", &secs)?;
        }
        Ok(())
    }

    /// Directory holding the favorites record, with `~` expanded.
    #[must_use]
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.as_ref().map_or_else(infrastructure::get_data_dir, |dir| {
            infrastructure::expand_tilde(&dir.to_string_lossy())
        })
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| FlicklistError::Config(format!("{name} must be a number, got {value:?}")))
}

/// Builds application state over the file-backed favorites record.
///
/// The returned state is not hydrated yet; send [`Event::HydrateFavorites`]
/// once the host is ready to render. If the data directory cannot be created
/// the favorites run in-memory only and nothing is persisted.
pub fn initialize(config: &Config) -> AppState {
    let data_dir = config.resolved_data_dir();
    tracing::debug!(data_dir = %data_dir.display(), "initializing flicklist");

    match FileStorage::new(data_dir) {
        Ok(storage) => AppState::new(FavoritesStore::boxed(storage)),
        Err(e) => {
            tracing::warn!(error = %e, "favorites storage unavailable, changes will not be persisted");
            AppState::new(FavoritesStore::in_memory())
        }
    }
}
