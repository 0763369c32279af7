//! HTTP proxy exposing the search gateway.
//!
//! # Routes
//!
//! - `GET /api/search?q=<query>` → [`SearchResponse`] or `{"error": "..."}`
//! - `GET /health` → `ok`
//!
//! The proxy keeps the upstream API key server-side; clients only ever talk to
//! these routes.

use crate::domain::error::{FlicklistError, Result};
use crate::gateway::cache::ResponseCache;
use crate::gateway::error::GatewayError;
use crate::gateway::models::SearchResponse;
use crate::gateway::query::SearchQuery;
use crate::gateway::upstream::UpstreamClient;
use crate::Config;
use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state behind every request.
#[derive(Debug, Clone)]
pub struct GatewayState {
    upstream: Arc<UpstreamClient>,
    cache: Arc<ResponseCache>,
}

impl GatewayState {
    #[must_use]
    pub fn new(upstream: UpstreamClient, cache: ResponseCache) -> Self {
        Self {
            upstream: Arc::new(upstream),
            cache: Arc::new(cache),
        }
    }

    /// Builds the state from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let upstream = UpstreamClient::new(config.tmdb_base_url.clone(), config.tmdb_api_key.clone());
        if !upstream.is_configured() {
            tracing::warn!("upstream endpoint or api key missing, searches will fail");
        }
        Self::new(upstream, ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)))
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

/// Builds the proxy router.
pub fn router(state: GatewayState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/search", get(search_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

async fn search_handler(
    State(state): State<GatewayState>,
    Query(params): Query<SearchParams>,
) -> std::result::Result<Json<SearchResponse>, GatewayError> {
    let query = SearchQuery::parse(params.q.as_deref().unwrap_or_default())?;
    tracing::info!(query = %query, "search requested");

    if let Some(cached) = state.cache.get(&query) {
        tracing::debug!(query = %query, "serving cached response");
        return Ok(Json(cached));
    }

    let response = state.upstream.search(&query).await?;
    state.cache.insert(&query, response.clone());
    Ok(Json(response))
}

async fn health_handler() -> &'static str {
    "ok"
}

/// Binds the configured port and serves until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn serve(config: &Config) -> Result<()> {
    let state = GatewayState::from_config(config);
    let app = router(state);

    let address = format!("{}:{}", config.host, config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(FlicklistError::Io)?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                tracing::error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
