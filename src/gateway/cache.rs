//! Short-lived cache of successful upstream responses.
//!
//! Identical queries inside the revalidation window are answered without
//! calling the upstream API again. Failures are never cached.

use crate::gateway::models::SearchResponse;
use crate::gateway::query::SearchQuery;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Entry limit; expired entries are purged first, then the oldest.
const MAX_ENTRIES: usize = 256;

#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, SearchResponse)>>,
}

impl ResponseCache {
    /// Creates a cache; a zero `ttl` disables caching.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a fresh cached response for `query`.
    #[must_use]
    pub fn get(&self, query: &SearchQuery) -> Option<SearchResponse> {
        self.get_at(query, Instant::now())
    }

    /// Stores a successful response for `query`.
    pub fn insert(&self, query: &SearchQuery, response: SearchResponse) {
        self.insert_at(query, response, Instant::now());
    }

    fn get_at(&self, query: &SearchQuery, now: Instant) -> Option<SearchResponse> {
        if self.ttl.is_zero() {
            return None;
        }
        let entries = self.entries.lock().ok()?;
        let fresh = entries
            .get(query.as_str())
            .filter(|(stored_at, _)| now.duration_since(*stored_at) < self.ttl)
            .map(|(_, response)| response.clone());
        fresh
    }

    fn insert_at(&self, query: &SearchQuery, response: SearchResponse, now: Instant) {
        if self.ttl.is_zero() {
            return;
        }
        let Ok(mut entries) = self.entries.lock() else {
            tracing::warn!("response cache lock poisoned, skipping insert");
            return;
        };

        if entries.len() >= MAX_ENTRIES {
            entries.retain(|_, (stored_at, _)| now.duration_since(*stored_at) < self.ttl);
        }
        if entries.len() >= MAX_ENTRIES {
            let oldest = entries
                .iter()
                .min_by_key(|(_, (stored_at, _))| *stored_at)
                .map(|(key, _)| key.clone());
            if let Some(key) = oldest {
                entries.remove(&key);
            }
        }

        entries.insert(query.as_str().to_string(), (now, response));
    }
}
