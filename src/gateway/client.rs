//! Client for the search proxy, used by presentation code.

use crate::gateway::models::{ErrorBody, SearchResponse};
use crate::gateway::query::SearchQuery;
use thiserror::Error;

/// Shown for whitespace-only submissions.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term";

/// Shown when the proxy cannot be reached or answers with garbage.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Failed to fetch movies. Try again.";

/// Fallback when a rejection carries no readable body.
const GENERIC_REJECTION_MESSAGE: &str = "Search failed";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent.
    #[error("empty search query")]
    EmptyQuery,

    /// The proxy answered with a non-success status.
    #[error("search rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The request never completed or the body was unreadable.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Message suitable for inline display next to the search box.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyQuery => EMPTY_QUERY_MESSAGE.to_string(),
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) => TRANSPORT_FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Calls `GET {base_url}/api/search?q=...` on a flicklist proxy.
///
/// # Examples
///
/// ```
/// use flicklist::gateway::{ClientError, ProxyClient};
///
/// let client = ProxyClient::new("http://127.0.0.1:1");
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let err = rt.block_on(client.search("   ")).unwrap_err();
/// assert!(matches!(err, ClientError::EmptyQuery));
/// ```
#[derive(Debug, Clone)]
pub struct ProxyClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProxyClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Validates `raw` locally, then searches through the proxy.
    ///
    /// # Errors
    ///
    /// - [`ClientError::EmptyQuery`] for blank input, before any network call
    /// - [`ClientError::Rejected`] when the proxy answers with an error status
    /// - [`ClientError::Transport`] when the request or body decoding fails
    pub async fn search(&self, raw: &str) -> Result<SearchResponse, ClientError> {
        let query = SearchQuery::parse(raw).map_err(|_| ClientError::EmptyQuery)?;

        let response = self
            .http
            .get(format!("{}/api/search", self.base_url))
            .query(&[("q", query.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.error)
            .unwrap_or_else(|_| GENERIC_REJECTION_MESSAGE.to_string());

        tracing::debug!(status = status.as_u16(), message = %message, "search rejected");
        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages() {
        assert_eq!(ClientError::EmptyQuery.user_message(), EMPTY_QUERY_MESSAGE);
        let rejected = ClientError::Rejected {
            status: 500,
            message: "API configuration missing".to_string(),
        };
        assert_eq!(rejected.user_message(), "API configuration missing");
    }

    #[tokio::test]
    async fn whitespace_query_never_reaches_network() {
        // Port 1 is never listening; a request would surface as Transport.
        let client = ProxyClient::new("http://127.0.0.1:1/");
        let err = client.search(" \t ").await.expect_err("rejected");
        assert!(matches!(err, ClientError::EmptyQuery));
    }
}
