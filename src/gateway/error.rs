//! Search gateway errors and their HTTP mapping.
//!
//! Each failure cause has its own public message, and the status class keeps
//! client mistakes (400) apart from server and upstream problems (500). The
//! internal detail of a 5xx error is logged here and never sent to the client.

use crate::gateway::models::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("search query is required")]
    EmptyQuery,

    #[error("upstream configuration missing: {0}")]
    MissingConfig(&'static str),

    #[error("upstream returned status {0}")]
    UpstreamStatus(u16),

    #[error("upstream request failed: {0}")]
    UpstreamRequest(#[from] reqwest::Error),
}

impl GatewayError {
    /// HTTP status reported to the caller.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::EmptyQuery => StatusCode::BAD_REQUEST,
            Self::MissingConfig(_) | Self::UpstreamStatus(_) | Self::UpstreamRequest(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message placed in the response body.
    #[must_use]
    pub const fn public_message(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "Search query is required",
            Self::MissingConfig(_) => "API configuration missing",
            Self::UpstreamStatus(_) => {
                "Failed to fetch movies from TMDB: upstream returned an error status"
            }
            Self::UpstreamRequest(_) => "Failed to fetch movies from TMDB: upstream request failed",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "search request failed");
        } else {
            tracing::debug!(error = %self, "search request rejected");
        }

        let body = ErrorBody {
            error: self.public_message().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_and_server_errors_keep_their_status_class() {
        assert_eq!(GatewayError::EmptyQuery.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            GatewayError::MissingConfig("api key").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            GatewayError::UpstreamStatus(503).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn public_messages_are_distinct_and_hide_details() {
        let messages = [
            GatewayError::EmptyQuery.public_message(),
            GatewayError::MissingConfig("api key").public_message(),
            GatewayError::UpstreamStatus(401).public_message(),
        ];
        assert_eq!(messages.len(), messages.iter().collect::<std::collections::HashSet<_>>().len());
        assert!(!GatewayError::MissingConfig("api key").public_message().contains("key"));
        assert!(!GatewayError::UpstreamStatus(401).public_message().contains("401"));
    }
}
