use crate::error::NodeError;
use crate::node::{Node, NodeKind};
use crate::state::State;
use async_trait::async_trait;
use conduit_llm::{ChatModel, ChatOptions, ChatRequest, ToolSpec};
use std::sync::Arc;

/// Sends the conversation to a chat model and appends its reply
pub struct ModelNode {
    model: Arc<dyn ChatModel>,
    options: ChatOptions,
}

impl ModelNode {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            options: ChatOptions::default(),
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.options.system_prompt = Some(prompt.into());
        self
    }

    /// Offer these tools to the model on every call
    pub fn with_tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.options.tools = tools;
        self
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}

#[async_trait]
impl Node for ModelNode {
    async fn apply(&self, state: &State) -> Result<State, NodeError> {
        let request = ChatRequest::new(state.messages.clone()).with_options(self.options.clone());

        tracing::debug!(
            model = self.model.model_name(),
            messages = request.messages.len(),
            tools = request.options.tools.len(),
            "Invoking chat model"
        );

        let reply = self.model.invoke(request).await?;

        if reply.has_tool_calls() {
            tracing::debug!(calls = reply.tool_calls.len(), "Model requested tools");
        }

        Ok(State::new().with_message(reply))
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Model
    }
}
