use crate::search::{Article, SearchClient, SearchQuery, TimeWindow};
use async_trait::async_trait;
use conduit_graph::{Tool, ToolError};
use conduit_llm::ToolSpec;
use serde_json::{json, Map, Value};
use std::sync::Arc;

pub const WEB_SEARCH_TOOL: &str = "web_search";

/// Upper bound on results a single tool call may request
pub const MAX_RESULTS_LIMIT: u32 = 20;

/// Web search exposed to the model as a tool
pub struct WebSearchTool {
    client: Arc<dyn SearchClient>,
    default_max_results: u32,
}

impl WebSearchTool {
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self {
            client,
            default_max_results: 5,
        }
    }

    pub fn with_default_max_results(mut self, max: u32) -> Self {
        self.default_max_results = max;
        self
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn spec(&self) -> ToolSpec {
        ToolSpec::new(
            WEB_SEARCH_TOOL,
            "Search the web for current information. Returns relevant results with snippets.",
            json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of results (default 5)",
                        "default": 5,
                        "minimum": 1,
                        "maximum": MAX_RESULTS_LIMIT
                    },
                    "time_window": {
                        "type": "string",
                        "enum": ["daily", "weekly", "monthly", "yearly"],
                        "description": "How recent the results must be"
                    }
                },
                "required": ["query"]
            }),
        )
    }

    async fn call(&self, arguments: &Map<String, Value>) -> Result<String, ToolError> {
        let query = arguments
            .get("query")
            .and_then(Value::as_str)
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ToolError::InvalidArguments("'query' must be a non-empty string".to_string()))?;

        let max_results = arguments
            .get("max_results")
            .and_then(Value::as_u64)
            .map(|n| u32::try_from(n).unwrap_or(MAX_RESULTS_LIMIT))
            .unwrap_or(self.default_max_results)
            .clamp(1, MAX_RESULTS_LIMIT);

        let mut request = SearchQuery::new(query).with_max_results(max_results);
        if let Some(window) = arguments.get("time_window").and_then(Value::as_str) {
            request = request.with_time_window(TimeWindow::parse_or_daily(window));
        }

        let articles = self.client.search(&request).await?;
        Ok(format_results(&articles))
    }
}

fn format_results(articles: &[Article]) -> String {
    if articles.is_empty() {
        return "No results found.".to_string();
    }

    articles
        .iter()
        .map(|a| format!("**{}**\n{}\nURL: {}", a.title, a.content, a.url))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}
