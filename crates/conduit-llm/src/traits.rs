use crate::error::Result;
use crate::types::{AssistantMessage, Message, ToolSpec};
use async_trait::async_trait;

/// Model-provider capability
///
/// One call, one well-formed assistant message. `tool_calls` is empty when
/// the model did not request any tool.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn invoke(&self, request: ChatRequest) -> Result<AssistantMessage>;

    /// Model identifier, used in logs
    fn model_name(&self) -> &str;
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub options: ChatOptions,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            options: ChatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChatOptions) -> Self {
        self.options = options;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Fixed instruction template sent ahead of the conversation
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub tools: Vec<ToolSpec>,
}

impl ChatOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    pub fn tools(mut self, tools: Vec<ToolSpec>) -> Self {
        self.tools = tools;
        self
    }
}
