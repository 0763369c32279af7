//! Executes [`Action`]s against the search proxy.

use crate::app::{Action, Event};
use crate::gateway::ProxyClient;

/// Runs `action` and returns the event to feed back into
/// [`handle_event`](crate::app::handle_event).
pub async fn perform(client: &ProxyClient, action: Action) -> Event {
    match action {
        Action::PerformSearch { seq, query } => {
            let outcome = client
                .search(&query)
                .await
                .map_err(|err| {
                    tracing::warn!(seq = seq, error = %err, "search request failed");
                    err.user_message()
                });
            Event::SearchCompleted { seq, outcome }
        }
    }
}
