use crate::search::Article;
use async_trait::async_trait;
use conduit_graph::{keys, Node, NodeError, State};
use conduit_llm::{ChatModel, ChatOptions, ChatRequest, Message};
use std::sync::Arc;

/// Summary recorded when the search returned nothing
pub const NO_ARTICLES_FOUND: &str = "No AI news articles were found for the selected time window.";

pub const SUMMARY_PROMPT: &str = "Summarize AI news articles into markdown format. For each item include:
- Date in **YYYY-MM-DD** format
- Concise sentence summary of the news
- Sort news by date, latest first
- Source URL as link
Use format:
### [Date]
- [Summary](URL)";

/// Asks the model for a markdown digest of `news_data`
pub struct SummarizeNode {
    model: Arc<dyn ChatModel>,
    prompt: String,
}

impl SummarizeNode {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            prompt: SUMMARY_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

fn format_articles(articles: &[Article]) -> String {
    articles
        .iter()
        .map(|a| {
            format!(
                "Content: {}\nURL: {}\nDate: {}\nTitle: {}",
                a.content,
                a.url,
                a.published_date.as_deref().unwrap_or("unknown"),
                a.title
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[async_trait]
impl Node for SummarizeNode {
    async fn apply(&self, state: &State) -> Result<State, NodeError> {
        let articles: Vec<Article> = state
            .get(keys::NEWS_DATA)
            .map_err(|e| NodeError::InvalidState(format!("Malformed news data: {}", e)))?
            .unwrap_or_default();

        if articles.is_empty() {
            tracing::info!("No articles to summarize");
            return Ok(State::new()
                .with_field(keys::SUMMARY, NO_ARTICLES_FOUND)
                .with_field(keys::NEWS_STATUS, "no_articles"));
        }

        let request = ChatRequest::new(vec![Message::user(format_articles(&articles))])
            .with_options(ChatOptions::new().system_prompt(self.prompt.clone()));
        let reply = self.model.invoke(request).await?;

        let summary = reply.content.trim();
        if summary.is_empty() {
            tracing::warn!(articles = articles.len(), "Model returned an empty summary");
            return Ok(State::new().with_field(keys::NEWS_STATUS, "empty_summary"));
        }

        Ok(State::new().with_field(keys::SUMMARY, summary))
    }
}
