use crate::search::{SearchClient, SearchQuery, TimeWindow};
use async_trait::async_trait;
use conduit_graph::{keys, Node, NodeError, State};
use std::sync::Arc;

/// Fetches the latest AI news for the requested window
///
/// The window comes from the `frequency` field when set, otherwise from the
/// latest user message. Unrecognized values fall back to daily.
pub struct FetchNewsNode {
    client: Arc<dyn SearchClient>,
}

impl FetchNewsNode {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Node for FetchNewsNode {
    async fn apply(&self, state: &State) -> Result<State, NodeError> {
        let requested = state
            .get_str(keys::FREQUENCY)
            .or_else(|| state.latest_user_text())
            .unwrap_or_default()
            .trim()
            .to_lowercase();
        let window = TimeWindow::parse_or_daily(&requested);

        let articles = self.client.search(&SearchQuery::latest_ai_news(window)).await?;
        tracing::info!(window = %window, count = articles.len(), "Fetched news");

        let mut update = State::new().with_field(keys::FREQUENCY, window.as_str());
        update
            .set_serialized(keys::NEWS_DATA, &articles)
            .map_err(|e| NodeError::InvalidState(format!("Cannot store articles: {}", e)))?;
        Ok(update)
    }
}
