use crate::search::{Article, SearchClient, SearchQuery};
use async_trait::async_trait;
use conduit_llm::ProviderError;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.tavily.com";

/// Tavily search API client
pub struct TavilyClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl TavilyClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_timeout(api_key, Duration::from_secs(30))
    }

    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::Config("Tavily API key is empty".to_string()));
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout,
        })
    }

    /// Read `TAVILY_API_KEY` from the environment
    pub fn from_env() -> Result<Self, ProviderError> {
        let api_key = std::env::var("TAVILY_API_KEY")
            .map_err(|_| ProviderError::Config("TAVILY_API_KEY is not set".to_string()))?;
        Self::new(api_key)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_payload(&self, query: &SearchQuery) -> Value {
        json!({
            "api_key": self.api_key,
            "query": query.query,
            "topic": query.topic,
            "time_range": query.time_window.time_range(),
            "days": query.time_window.days(),
            "max_results": query.max_results,
            "include_answer": "advanced",
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Article>,
}

fn parse_search_response(body: Value) -> Result<Vec<Article>, ProviderError> {
    let response: SearchResponse = serde_json::from_value(body)
        .map_err(|e| ProviderError::InvalidResponse(format!("Unexpected search payload: {}", e)))?;
    Ok(response.results)
}

#[async_trait]
impl SearchClient for TavilyClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<Article>, ProviderError> {
        let url = format!("{}/search", self.base_url);

        tracing::debug!(
            query = %query.query,
            window = %query.time_window,
            max_results = query.max_results,
            "Searching Tavily"
        );

        let response = self
            .http
            .post(&url)
            .json(&self.build_payload(query))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProviderError::Timeout(self.timeout)
                } else {
                    ProviderError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                provider: "tavily".to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = response.json().await?;
        let articles = parse_search_response(body)?;
        tracing::debug!(count = articles.len(), "Search returned articles");
        Ok(articles)
    }
}
