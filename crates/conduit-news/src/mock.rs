use crate::search::{Article, SearchClient, SearchQuery};
use async_trait::async_trait;
use conduit_llm::ProviderError;
use std::sync::Mutex;

/// Mock search client for testing
///
/// Returns the same articles for every query, or fails every query, and
/// records what it was asked.
#[derive(Default)]
pub struct MockSearchClient {
    articles: Vec<Article>,
    failure: Option<String>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockSearchClient {
    pub fn new(articles: Vec<Article>) -> Self {
        Self {
            articles,
            ..Self::default()
        }
    }

    /// Every search fails with `ProviderError::Unavailable`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchClient for MockSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, ProviderError> {
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(query.clone());
        }

        match &self.failure {
            Some(message) => Err(ProviderError::Unavailable(message.clone())),
            None => Ok(self
                .articles
                .iter()
                .take(query.max_results as usize)
                .cloned()
                .collect()),
        }
    }
}
