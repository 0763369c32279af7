//! Client for the upstream movie-metadata API.

use crate::gateway::error::GatewayError;
use crate::gateway::models::{SearchResponse, UpstreamPage};
use crate::gateway::query::SearchQuery;
use std::time::Duration;

/// Upper bound on a single upstream call.
const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Calls `{base_url}/search/movie?query=...&api_key=...`.
///
/// Missing credentials are not an error at construction time: the proxy still
/// starts, and each search reports [`GatewayError::MissingConfig`].
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl UpstreamClient {
    /// Creates a client. Blank values count as missing.
    #[must_use]
    pub fn new(base_url: Option<String>, api_key: Option<String>) -> Self {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let http = reqwest::Client::builder()
            .timeout(UPSTREAM_TIMEOUT)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "failed to build tuned HTTP client, using defaults");
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: non_blank(base_url).map(|url| url.trim_end_matches('/').to_string()),
            api_key: non_blank(api_key),
        }
    }

    /// Returns `true` when both the endpoint and the key are configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some() && self.api_key.is_some()
    }

    /// Searches the upstream API.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::MissingConfig`] when the endpoint or key is absent
    /// - [`GatewayError::UpstreamStatus`] for a non-success response
    /// - [`GatewayError::UpstreamRequest`] for transport or decoding failures
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, GatewayError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(GatewayError::MissingConfig("upstream base url"))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingConfig("upstream api key"))?;

        tracing::debug!(query = %query, "calling upstream search");

        let response = self
            .http
            .get(format!("{base_url}/search/movie"))
            .query(&[("query", query.as_str()), ("api_key", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus(status.as_u16()));
        }

        let page: UpstreamPage = response.json().await?;
        let response = page.into_response();

        tracing::debug!(
            returned = response.results.len(),
            total = response.total_results,
            "upstream search complete"
        );
        Ok(response)
    }
}
