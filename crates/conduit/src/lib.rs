//! # Conduit
//!
//! Workflow engine for conversational agents. A run threads one state record
//! through a graph of nodes (model calls, tools, fetch/summarize/persist
//! steps) and reports progress node by node.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use conduit::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = LLMConfig::new(Provider::Groq, Provider::Groq.default_model());
//!     let api_key = ClientFactory::api_key_from_env(&config)?;
//!     let model = ClientFactory::create_client(&config, &api_key)?;
//!
//!     let graph = GraphBuilder::new()
//!         .add_node("chatbot", ModelNode::new(model))
//!         .set_entry_point("chatbot")
//!         .add_edge("chatbot", END)
//!         .compile()?;
//!
//!     let executor = Executor::new(Arc::new(graph), GraphConfig::default());
//!     let state = executor
//!         .run(State::new().with_message(Message::user("Hello!")))
//!         .await?;
//!
//!     for entry in fold_state(&State::new(), &state) {
//!         println!("{}: {}", entry.role, entry.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`conduit-llm`**: messages, the `ChatModel` capability, OpenAI/Groq/Gemini clients
//! - **`conduit-graph`**: state and merge, nodes, routers, graph builder, executor
//! - **`conduit-news`**: search capability, web search tool, news pipeline nodes
//! - **`conduit-session`**: presentation entries, history, use cases, configuration

pub mod prelude;

pub use conduit_llm::{
    AssistantMessage, ChatModel, ChatOptions, ChatRequest, ClientFactory, EchoChatModel,
    LLMConfig, Message, MockChatModel, OpenAIClient, Provider, ProviderError, ToolCallRequest,
    ToolSpec,
};

pub use conduit_graph::{
    keys, merge, Edge, Executor, FnNode, FnRouter, FnTool, Graph, GraphBuilder, GraphConfig,
    GraphError, ModelNode, Node, NodeError, NodeKind, NodeUpdate, Route, Router, RoutingError,
    State, StreamEvent, Tool, ToolError, ToolNode, ToolRegistry, ToolsRouter, END,
};

pub use conduit_news::{
    build_news_graph, Article, FetchNewsNode, FileSink, MockSearchClient, NewsPipeline,
    PersistError, PersistNode, PersistenceSink, SearchClient, SearchQuery, SummarizeNode,
    TavilyClient, TimeWindow, WebSearchTool, NO_ARTICLES_FOUND,
};

pub use conduit_session::{
    entries_from_messages, fold_state, messages_from_entries, summary_entry, AppConfig,
    ConversationEntry, Document, EntryDisplay, EntryFolder, GraphCache, GraphParts,
    PresentationError, Role, Session, SessionError, UseCase,
};
