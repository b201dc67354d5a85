use crate::error::{Result, SessionError};
use conduit_graph::{Graph, ModelNode, ToolNode, ToolRegistry, ToolsRouter, END};
use conduit_llm::ChatModel;
use conduit_news::{NewsPipeline, PersistenceSink, SearchClient, WebSearchTool};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

pub const CHATBOT_NODE: &str = "chatbot";
pub const TOOLS_NODE: &str = "tools";

/// Graph topology a conversation runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UseCase {
    Chatbot,
    ChatbotWithWebSearch,
    AiNewsSummarizer,
}

impl UseCase {
    pub const ALL: [UseCase; 3] = [Self::Chatbot, Self::ChatbotWithWebSearch, Self::AiNewsSummarizer];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Chatbot => "Chatbot",
            Self::ChatbotWithWebSearch => "Chatbot with Web Search",
            Self::AiNewsSummarizer => "AI News Summarizer",
        }
    }

    pub fn needs_search(&self) -> bool {
        matches!(self, Self::ChatbotWithWebSearch | Self::AiNewsSummarizer)
    }

    /// Build this use case's graph from shared collaborators
    pub fn build_graph(&self, parts: &GraphParts) -> Result<Graph> {
        let graph = match self {
            Self::Chatbot => {
                let mut node = ModelNode::new(Arc::clone(&parts.model));
                if let Some(prompt) = &parts.system_prompt {
                    node = node.with_system_prompt(prompt.clone());
                }
                Graph::builder()
                    .add_node(CHATBOT_NODE, node)
                    .set_entry_point(CHATBOT_NODE)
                    .add_edge(CHATBOT_NODE, END)
                    .compile()?
            }
            Self::ChatbotWithWebSearch => {
                let search = self.search(parts)?;
                let registry = Arc::new(ToolRegistry::new().with_tool(WebSearchTool::new(search)));

                let mut node = ModelNode::new(Arc::clone(&parts.model)).with_tools(registry.specs());
                if let Some(prompt) = &parts.system_prompt {
                    node = node.with_system_prompt(prompt.clone());
                }
                let router = ToolsRouter::new(TOOLS_NODE, registry.names())
                    .with_max_tool_rounds(parts.max_tool_rounds);

                Graph::builder()
                    .add_node(CHATBOT_NODE, node)
                    .add_node(TOOLS_NODE, ToolNode::new(registry))
                    .set_entry_point(CHATBOT_NODE)
                    .add_conditional_edges(CHATBOT_NODE, router)
                    .add_edge(TOOLS_NODE, CHATBOT_NODE)
                    .compile()?
            }
            Self::AiNewsSummarizer => NewsPipeline::new(self.search(parts)?, Arc::clone(&parts.model))
                .with_sink(Arc::clone(&parts.sink))
                .with_output_dir(parts.output_dir.clone())
                .build()?,
        };

        tracing::debug!(use_case = %self, "Built graph");
        Ok(graph)
    }

    fn search(&self, parts: &GraphParts) -> Result<Arc<dyn SearchClient>> {
        parts
            .search
            .clone()
            .ok_or_else(|| SessionError::MissingSearch(self.label().to_string()))
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for UseCase {
    type Err = SessionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "chatbot" | "chat" => Ok(Self::Chatbot),
            "chatbot with web search" | "web" | "web search" => Ok(Self::ChatbotWithWebSearch),
            "ai news summarizer" | "news" | "ai news" => Ok(Self::AiNewsSummarizer),
            _ => Err(SessionError::Config(format!("Unknown use case: {}", s))),
        }
    }
}

/// Collaborators shared by every use-case graph
#[derive(Clone)]
pub struct GraphParts {
    pub model: Arc<dyn ChatModel>,
    pub search: Option<Arc<dyn SearchClient>>,
    pub sink: Arc<dyn PersistenceSink>,
    pub output_dir: PathBuf,
    pub system_prompt: Option<String>,
    pub max_tool_rounds: u32,
}

impl GraphParts {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            search: None,
            sink: Arc::new(conduit_news::FileSink::new()),
            output_dir: PathBuf::from(conduit_news::nodes::DEFAULT_OUTPUT_DIR),
            system_prompt: None,
            max_tool_rounds: 8,
        }
    }

    pub fn with_search(mut self, search: Arc<dyn SearchClient>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn PersistenceSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = max;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use conduit_llm::EchoChatModel;
    use conduit_news::MockSearchClient;

    #[test]
    fn test_parse_labels_and_slugs() {
        for use_case in UseCase::ALL {
            assert_eq!(use_case.label().parse::<UseCase>().unwrap(), use_case);
        }
        assert_eq!("web".parse::<UseCase>().unwrap(), UseCase::ChatbotWithWebSearch);
        assert_eq!("ai-news".parse::<UseCase>().unwrap(), UseCase::AiNewsSummarizer);
        assert!("poetry".parse::<UseCase>().is_err());
    }

    #[test]
    fn test_topologies() {
        let parts = GraphParts::new(Arc::new(EchoChatModel)).with_search(Arc::new(MockSearchClient::default()));

        let chat = UseCase::Chatbot.build_graph(&parts).unwrap();
        assert_eq!(chat.node_names(), &[CHATBOT_NODE.to_string()]);

        let web = UseCase::ChatbotWithWebSearch.build_graph(&parts).unwrap();
        let mermaid = web.to_mermaid();
        assert!(mermaid.contains("chatbot -.-> tools;"));
        assert!(mermaid.contains("tools --> chatbot;"));

        let news = UseCase::AiNewsSummarizer.build_graph(&parts).unwrap();
        assert_eq!(news.node_names().len(), 3);
    }

    #[test]
    fn test_search_required() {
        let parts = GraphParts::new(Arc::new(EchoChatModel));
        assert!(UseCase::Chatbot.build_graph(&parts).is_ok());
        assert!(matches!(
            UseCase::AiNewsSummarizer.build_graph(&parts),
            Err(SessionError::MissingSearch(_))
        ));
    }
}
