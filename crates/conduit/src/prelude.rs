//! Prelude module for convenient imports
//!
//! Import everything you need with:
//! ```rust
//! use conduit::prelude::*;
//! ```

pub use crate::{
    ChatModel, ChatOptions, ChatRequest, ClientFactory, LLMConfig, Provider, ProviderError,
    AssistantMessage, Message, ToolCallRequest, ToolSpec,
    State, Node, NodeKind, NodeError, GraphBuilder, Graph, GraphConfig, GraphError, Executor,
    NodeUpdate, StreamEvent, ModelNode, ToolNode, ToolRegistry, Tool, ToolsRouter, Route, END,
    SearchClient, TimeWindow, Article, NewsPipeline, WebSearchTool,
    ConversationEntry, Role, Session, UseCase, AppConfig, fold_state,
};
