//! Search query validation shared by the proxy and its clients.

use crate::gateway::error::GatewayError;
use std::fmt;

/// A trimmed, non-empty search query.
///
/// Constructing one is the only way to reach the upstream API, so a blank
/// query is rejected before any network call on either side of the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Trims `raw` and rejects it if nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EmptyQuery`] for empty or whitespace-only input.
    ///
    /// # Examples
    ///
    /// ```
    /// use flicklist::gateway::SearchQuery;
    ///
    /// assert_eq!(SearchQuery::parse("  dune ").unwrap().as_str(), "dune");
    /// assert!(SearchQuery::parse("  ").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, GatewayError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::EmptyQuery);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The trimmed query text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_variants() {
        for raw in ["", " ", "\t\n", "\u{3000}"] {
            assert!(
                matches!(SearchQuery::parse(raw), Err(GatewayError::EmptyQuery)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn keeps_inner_whitespace() {
        let query = SearchQuery::parse(" the  godfather ").expect("valid");
        assert_eq!(query.to_string(), "the  godfather");
    }
}
