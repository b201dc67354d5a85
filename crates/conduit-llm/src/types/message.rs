use serde::{Deserialize, Serialize};
use super::tool::ToolCallRequest;

/// Conversation message (provider-agnostic)
///
/// Closed set of shapes a conversation can hold. Routing and presentation
/// match on it exhaustively instead of inspecting types at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// Input typed by the user
    User {
        content: String,
    },

    /// Model turn, possibly requesting tools
    Assistant(AssistantMessage),

    /// Result of one tool call, answering the request with the same `call_id`
    Tool {
        content: String,
        call_id: String,
    },
}

/// Output of a model invocation
///
/// Empty `content` with non-empty `tool_calls` is a valid "silent" turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub content: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
}

impl AssistantMessage {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Silent turn that only requests tool execution
    pub fn with_tool_calls(tool_calls: Vec<ToolCallRequest>) -> Self {
        Self {
            content: String::new(),
            tool_calls,
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    pub fn is_silent(&self) -> bool {
        self.content.is_empty() && self.has_tool_calls()
    }
}

impl Message {
    /// Create user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Create assistant message with text only
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(AssistantMessage::text(content))
    }

    /// Create tool result message
    pub fn tool_result(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            content: content.into(),
            call_id: call_id.into(),
        }
    }

    /// Get role as string
    pub fn role(&self) -> &str {
        match self {
            Self::User { .. } => "user",
            Self::Assistant(_) => "assistant",
            Self::Tool { .. } => "tool",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::User { content } => content,
            Self::Assistant(message) => &message.content,
            Self::Tool { content, .. } => content,
        }
    }

    pub fn as_assistant(&self) -> Option<&AssistantMessage> {
        match self {
            Self::Assistant(message) => Some(message),
            _ => None,
        }
    }

    /// Tool calls requested by this message (empty unless it is an assistant turn)
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            Self::Assistant(message) => &message.tool_calls,
            _ => &[],
        }
    }
}

impl From<AssistantMessage> for Message {
    fn from(message: AssistantMessage) -> Self {
        Self::Assistant(message)
    }
}
