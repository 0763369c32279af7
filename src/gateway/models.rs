//! Wire types of the search proxy and of the upstream metadata API.

use crate::domain::Movie;
use serde::{Deserialize, Serialize};

/// Maximum number of movies returned per search.
pub const RESULT_CAP: usize = 20;

/// Successful search response.
///
/// `results` is capped at [`RESULT_CAP`] while `total_results` reports the
/// upstream's own count. The two are independent: a response may carry 20
/// movies and a total of several hundred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Movie>,
    pub total_results: u64,
    pub total_pages: u32,
}

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// The subset of an upstream search page the proxy reads.
#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamPage {
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub total_results: Option<u64>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl UpstreamPage {
    /// Caps the results and fills in totals.
    ///
    /// Without an upstream total, the count of results received before
    /// capping is reported; without a page count, a single page is assumed.
    pub fn into_response(self) -> SearchResponse {
        let received = self.results.len() as u64;
        let mut results = self.results;
        results.truncate(RESULT_CAP);

        SearchResponse {
            results,
            total_results: self.total_results.unwrap_or(received),
            total_pages: self.total_pages.unwrap_or(1),
        }
    }
}
